use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::{Error, Result};
use crate::models::entry::{Entry, EntryKind};
use crate::models::link::{self, Ln};
use crate::vocab::{self, NS_RS, NS_SITEMAP};
use crate::xml::{self, Element};

// ---------------------------------------------------------------------------
// The Root Container: <urlset>
// A ResourceSync document: capability metadata, document-level links,
// and the entry list.
// ---------------------------------------------------------------------------

/// The closed set of document flavors, each fixing a root tag and a
/// capability string. Host-defined flavors (e.g. `sitemapindex`-rooted
/// index documents) go through [`Document::with_names`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Description,
    CapabilityList,
    ResourceList,
    ResourceDump,
    ChangeList,
    ChangeDump,
}

impl DocumentKind {
    pub fn capability(self) -> &'static str {
        match self {
            DocumentKind::Description => vocab::CAPABILITY_DESCRIPTION,
            DocumentKind::CapabilityList => vocab::CAPABILITY_CAPABILITYLIST,
            DocumentKind::ResourceList => vocab::CAPABILITY_RESOURCELIST,
            DocumentKind::ResourceDump => vocab::CAPABILITY_RESOURCEDUMP,
            DocumentKind::ChangeList => vocab::CAPABILITY_CHANGELIST,
            DocumentKind::ChangeDump => vocab::CAPABILITY_CHANGEDUMP,
        }
    }

    pub fn root_name(self) -> &'static str {
        "urlset"
    }

    pub fn from_capability(capability: &str) -> Option<Self> {
        match capability {
            vocab::CAPABILITY_DESCRIPTION => Some(DocumentKind::Description),
            vocab::CAPABILITY_CAPABILITYLIST => Some(DocumentKind::CapabilityList),
            vocab::CAPABILITY_RESOURCELIST => Some(DocumentKind::ResourceList),
            vocab::CAPABILITY_RESOURCEDUMP => Some(DocumentKind::ResourceDump),
            vocab::CAPABILITY_CHANGELIST => Some(DocumentKind::ChangeList),
            vocab::CAPABILITY_CHANGEDUMP => Some(DocumentKind::ChangeDump),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    root_name: String,
    capability: String,
    // Document-level modification marker. Projects as the `from`
    // attribute; `last_modified` and `from` are the same value.
    from: Option<OffsetDateTime>,
    until: Option<OffsetDateTime>,
    entries: Vec<Entry>,
    lns: Vec<Ln>,
}

impl Document {
    pub fn new(kind: DocumentKind) -> Self {
        Self::with_names(kind.root_name(), kind.capability())
    }

    /// Construct a document with an arbitrary root tag and capability,
    /// both fixed for the lifetime of the document.
    pub fn with_names(root_name: impl Into<String>, capability: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            capability: capability.into(),
            from: None,
            until: None,
            entries: Vec::new(),
            lns: Vec::new(),
        }
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// The declared purpose of this document. Immutable after
    /// construction; there is deliberately no setter.
    pub fn capability(&self) -> &str {
        &self.capability
    }

    pub fn last_modified(&self) -> Option<OffsetDateTime> {
        self.from
    }

    pub fn set_last_modified(&mut self, last_modified: OffsetDateTime) {
        self.from = Some(last_modified);
    }

    pub fn from_time(&self) -> Option<OffsetDateTime> {
        self.from
    }

    pub fn set_from(&mut self, from: OffsetDateTime) {
        self.from = Some(from);
    }

    pub fn until_time(&self) -> Option<OffsetDateTime> {
        self.until
    }

    pub fn set_until(&mut self, until: OffsetDateTime) {
        self.until = Some(until);
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// The live entry list, in insertion order. Chronological ordering is
    /// applied only at projection time.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Construct a document-level link, append it, and return it for
    /// further mutation.
    pub fn add_ln(&mut self, rel: impl Into<String>, href: impl Into<String>) -> &mut Ln {
        self.lns.push(Ln::with(rel, href));
        let last = self.lns.len() - 1;
        &mut self.lns[last]
    }

    /// Append a caller-built document-level link.
    pub fn push_ln(&mut self, ln: Ln) {
        self.lns.push(ln);
    }

    pub fn lns(&self) -> &[Ln] {
        &self.lns
    }

    /// Entries in the order they are emitted: ascending by last
    /// modification time, entries without a timestamp first, ties in
    /// insertion order.
    fn chronological(&self) -> Vec<&Entry> {
        // Unset maps to the minimum representable instant, then a stable
        // sort preserves insertion order among equals.
        let floor = PrimitiveDateTime::MIN.assume_utc();
        let mut ordered: Vec<&Entry> = self.entries.iter().collect();
        ordered.sort_by_key(|entry| entry.last_modified().unwrap_or(floor));
        ordered
    }

    /// Project the document as its element tree, computed fresh from the
    /// current state.
    pub fn to_element(&self) -> Element {
        tracing::debug!(
            capability = %self.capability,
            entries = self.entries.len(),
            links = self.lns.len(),
            "building document element tree"
        );

        let mut element = Element::new(&self.root_name, NS_SITEMAP);

        let mut md = Element::new("md", NS_RS);
        md.set_attr("capability", &self.capability);
        if let Some(from) = self.from {
            md.set_attr("from", vocab::format_timestamp(from));
        }
        if let Some(until) = self.until {
            md.set_attr("until", vocab::format_timestamp(until));
        }
        element.push_element(md);

        for ln in &self.lns {
            element.push_element(ln.to_element());
        }
        for entry in self.chronological() {
            element.push_element(entry.to_element());
        }
        element
    }

    /// Render the document as XML text: sitemap namespace as default,
    /// ResourceSync terms namespace under the `rs` prefix.
    pub fn serialise(&self) -> Result<String> {
        xml::writer::serialise(&self.to_element())
    }

    /// Rebuild window metadata, document links, and the entry list from a
    /// generic element tree. State previously held in those fields is
    /// replaced; root tag and capability stay as constructed.
    pub fn populate(&mut self, element: &Element) -> Result<()> {
        if let Some(md) = element.child("md", NS_RS) {
            if let Some(from) = md.attr("from") {
                self.from = Some(link::parse_timestamp_attr(from)?);
            }
            if let Some(until) = md.attr("until") {
                self.until = Some(link::parse_timestamp_attr(until)?);
            }
        }

        self.lns = element
            .children_named("ln", NS_RS)
            .map(Ln::from_element)
            .collect::<Result<_>>()?;

        self.entries.clear();
        for child in element.elements() {
            if child.namespace.as_deref() != Some(NS_SITEMAP) {
                continue;
            }
            let kind = match child.name.as_str() {
                "url" => EntryKind::Url,
                "sitemap" => EntryKind::Sitemap,
                _ => continue,
            };
            self.entries.push(Entry::from_element(kind, child)?);
        }

        tracing::debug!(
            capability = %self.capability,
            entries = self.entries.len(),
            links = self.lns.len(),
            "populated document from element tree"
        );
        Ok(())
    }

    /// Reconstruct a document from a generic element tree, reading the
    /// root tag and capability from the tree itself.
    pub fn from_element(element: &Element) -> Result<Self> {
        let md = element
            .child("md", NS_RS)
            .ok_or_else(|| Error::Structure("document element has no rs:md child".into()))?;
        let capability = md
            .attr("capability")
            .ok_or_else(|| Error::Structure("rs:md element has no capability".into()))?;

        let mut document = Document::with_names(&element.name, capability);
        document.populate(element)?;
        Ok(document)
    }

    /// Reconstruct a document from XML text.
    pub fn from_xml(text: &str) -> Result<Self> {
        let root = xml::reader::parse(text)?;
        Self::from_element(&root)
    }
}
