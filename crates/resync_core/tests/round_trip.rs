use resync_core::vocab::{
    self, CHANGE_CREATED, CHANGE_DELETED, FREQ_DAILY, HASH_MD5, HASH_SHA_256, REL_DESCRIBED_BY,
    REL_DESCRIBES,
};
use resync_core::{Document, DocumentKind, Entry, EntryKind};

fn build_change_list() -> Document {
    let mut doc = Document::new(DocumentKind::ChangeList);
    doc.set_from(vocab::parse_timestamp("2013-01-02T00:00:00Z").unwrap());
    doc.set_until(vocab::parse_timestamp("2013-01-03T00:00:00Z").unwrap());
    doc.add_ln(REL_DESCRIBED_BY, "http://example.com/info.xml");

    let mut created = Entry::url();
    created.set_loc("http://example.com/res1");
    created.set_last_modified(vocab::parse_timestamp("2013-01-02T13:00:00Z").unwrap());
    created.set_change(CHANGE_CREATED);
    created.set_change_freq(FREQ_DAILY);
    created.set_length(8876);
    created.set_mime_type("text/html");
    created.add_hash(HASH_MD5, "1584abdf8ebdc9802ac0c6a7402c03b6");
    created.add_hash(HASH_SHA_256, "854f61290e2e197a11bc91063afce22e");
    created
        .add_ln(REL_DESCRIBES, "http://example.com/about/res1")
        .set_mime_type("application/rdf+xml");
    doc.add_entry(created);

    let mut deleted = Entry::url();
    deleted.set_loc("http://example.com/res2");
    deleted.set_last_modified(vocab::parse_timestamp("2013-01-02T18:00:00Z").unwrap());
    deleted.set_change(CHANGE_DELETED);
    doc.add_entry(deleted);

    doc
}

#[test]
fn serialise_then_parse_yields_an_equivalent_document() {
    let original = build_change_list();
    let serial = original.serialise().unwrap();

    let rebuilt = Document::from_xml(&serial).unwrap();

    assert_eq!(rebuilt.root_name(), original.root_name());
    assert_eq!(rebuilt.capability(), original.capability());
    assert_eq!(rebuilt.from_time(), original.from_time());
    assert_eq!(rebuilt.until_time(), original.until_time());
    assert_eq!(rebuilt.lns(), original.lns());

    // Every entry had a distinct timestamp, so chronological emission is a
    // deterministic permutation of insertion order; here they already
    // coincide.
    assert_eq!(rebuilt.entries(), original.entries());
}

#[test]
fn reparse_is_stable_after_chronological_reordering() {
    let mut original = Document::new(DocumentKind::ChangeList);

    let mut newer = Entry::url();
    newer.set_loc("http://example.com/newer");
    newer.set_last_modified(vocab::parse_timestamp("2013-01-02T18:00:00Z").unwrap());
    original.add_entry(newer);

    let mut older = Entry::url();
    older.set_loc("http://example.com/older");
    older.set_last_modified(vocab::parse_timestamp("2013-01-02T13:00:00Z").unwrap());
    original.add_entry(older);

    let first_pass = Document::from_xml(&original.serialise().unwrap()).unwrap();
    // The wire order is chronological, so the rebuilt list starts with the
    // older entry.
    assert_eq!(
        first_pass.entries()[0].loc(),
        Some("http://example.com/older")
    );

    // A second round trip no longer changes anything.
    let second_pass = Document::from_xml(&first_pass.serialise().unwrap()).unwrap();
    assert_eq!(second_pass.entries(), first_pass.entries());
}

#[test]
fn populate_from_a_foreign_prefix_layout() {
    // Same namespaces, different prefixes: the reader resolves URIs, so
    // population does not depend on the producer's prefix choices.
    let text = r#"<?xml version="1.0" encoding="UTF-8"?>
    <sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9"
               xmlns:terms="http://www.openarchives.org/rs/terms/">
        <terms:md capability="changelist" from="2013-01-02T00:00:00Z"/>
        <sm:url>
            <sm:loc>http://example.com/res1</sm:loc>
            <terms:md change="updated"/>
        </sm:url>
    </sm:urlset>"#;

    let doc = Document::from_xml(text).unwrap();
    assert_eq!(doc.capability(), "changelist");
    assert_eq!(doc.entries().len(), 1);
    assert_eq!(doc.entries()[0].loc(), Some("http://example.com/res1"));
    assert_eq!(doc.entries()[0].change(), Some("updated"));
}

#[test]
fn sitemap_index_entries_round_trip() {
    let mut index = Document::with_names("sitemapindex", vocab::CAPABILITY_RESOURCELIST);
    let mut part = Entry::sitemap();
    part.set_loc("http://example.com/resourcelist-part1.xml");
    index.add_entry(part);

    let rebuilt = Document::from_xml(&index.serialise().unwrap()).unwrap();
    assert_eq!(rebuilt.root_name(), "sitemapindex");
    assert_eq!(rebuilt.entries().len(), 1);
    assert_eq!(rebuilt.entries()[0].kind(), EntryKind::Sitemap);
    assert_eq!(
        rebuilt.entries()[0].loc(),
        Some("http://example.com/resourcelist-part1.xml")
    );
}

#[test]
fn malformed_timestamp_text_is_a_parse_error() {
    let text = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
                          xmlns:rs="http://www.openarchives.org/rs/terms/">
        <rs:md capability="resourcelist"/>
        <url>
            <loc>http://example.com/res1</loc>
            <lastmod>January 2nd, 2013</lastmod>
        </url>
    </urlset>"#;

    match Document::from_xml(text) {
        Err(resync_core::Error::Timestamp { value, .. }) => {
            assert_eq!(value, "January 2nd, 2013");
        }
        other => panic!("expected a timestamp error, got {other:?}"),
    }
}
