pub mod error;
pub mod models;
pub mod validation;
pub mod vocab;
pub mod xml;

pub use error::{Error, Result};
pub use models::document::{Document, DocumentKind};
pub use models::entry::{Entry, EntryKind};
pub use models::link::Ln;

use validation::{rules, ValidationEngine};

/// The engine with every built-in structural rule registered.
pub fn standard_validator() -> ValidationEngine {
    ValidationEngine::new()
        .add_rule(rules::LnHrefRequired)
        .add_rule(rules::EntryLocRequired)
        .add_rule(rules::KnownHashAlgorithm)
        .add_rule(rules::UntilWithoutChangeCapability)
        .add_rule(rules::WindowOrder)
}

#[cfg(test)]
mod tests {
    use crate::models::document::Document;
    use crate::vocab::{NS_RS, NS_SITEMAP};

    const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
    <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
            xmlns:rs="http://www.openarchives.org/rs/terms/">
        <rs:md capability="resourcelist" from="2013-01-03T09:00:00Z"/>
        <rs:ln rel="describedby" href="http://example.com/info_about_set1_of_resources.xml"/>
        <url>
            <loc>http://example.com/res1</loc>
            <lastmod>2013-01-02T13:00:00Z</lastmod>
            <rs:md hash="md5:1584abdf8ebdc9802ac0c6a7402c03b6" length="8876" type="text/html"/>
        </url>
        <url>
            <loc>http://example.com/res2</loc>
            <lastmod>2013-01-02T14:00:00Z</lastmod>
            <rs:md hash="md5:1e0d5cb8ef6ba40c99b14c0237be735e sha-256:854f61290e2e197a11bc91063afce22e43f8ccc655237e2d7e7f632ac4efe6ba"
                   length="14599" type="application/pdf"/>
        </url>
    </urlset>
    "#;

    #[test]
    fn test_parse_sample_resource_list() {
        let document = Document::from_xml(SAMPLE_XML).expect("failed to parse sample XML");

        assert_eq!(document.root_name(), "urlset");
        assert_eq!(document.capability(), "resourcelist");
        assert_eq!(
            document.last_modified().map(crate::vocab::format_timestamp),
            Some("2013-01-03T09:00:00Z".to_string())
        );

        assert_eq!(document.lns().len(), 1);
        assert_eq!(document.lns()[0].rel(), Some("describedby"));
        assert_eq!(
            document.lns()[0].href(),
            Some("http://example.com/info_about_set1_of_resources.xml")
        );

        assert_eq!(document.entries().len(), 2);
        let res1 = &document.entries()[0];
        assert_eq!(res1.loc(), Some("http://example.com/res1"));
        assert_eq!(res1.length(), Some(8876));
        assert_eq!(res1.mime_type(), Some("text/html"));
        assert_eq!(
            res1.hashes().get("md5").map(String::as_str),
            Some("1584abdf8ebdc9802ac0c6a7402c03b6")
        );

        let res2 = &document.entries()[1];
        assert_eq!(res2.hashes().len(), 2);
        assert_eq!(
            res2.hashes().get("sha-256").map(String::as_str),
            Some("854f61290e2e197a11bc91063afce22e43f8ccc655237e2d7e7f632ac4efe6ba")
        );

        // Re-projecting the parsed document keeps the namespaces intact.
        let element = document.to_element();
        assert_eq!(element.namespace.as_deref(), Some(NS_SITEMAP));
        assert!(element.child("md", NS_RS).is_some());
    }

    #[test]
    fn test_standard_validator_passes_sample() {
        let document = Document::from_xml(SAMPLE_XML).expect("failed to parse sample XML");
        let findings = crate::standard_validator().run(&document);
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }
}
