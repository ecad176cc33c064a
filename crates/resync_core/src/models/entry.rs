use indexmap::IndexMap;
use time::OffsetDateTime;

use crate::error::Result;
use crate::models::link::{self, Ln};
use crate::vocab::{self, NS_RS, NS_SITEMAP};
use crate::xml::Element;

// ---------------------------------------------------------------------------
// The Node: <url> / <sitemap>
// One described resource inside a document.
// ---------------------------------------------------------------------------

/// The fixed root tag of an entry. `Url` entries describe resources;
/// `Sitemap` entries point at further documents from an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Url,
    Sitemap,
}

impl EntryKind {
    pub fn root_name(self) -> &'static str {
        match self {
            EntryKind::Url => "url",
            EntryKind::Sitemap => "sitemap",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    kind: EntryKind,
    loc: Option<String>,
    last_modified: Option<OffsetDateTime>,
    change_freq: Option<String>,
    capability: Option<String>,
    change: Option<String>,
    length: Option<u64>,
    path: Option<String>,
    mime_type: Option<String>,
    encoding: Option<String>,
    hashes: IndexMap<String, String>,
    lns: Vec<Ln>,
}

impl Entry {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            loc: None,
            last_modified: None,
            change_freq: None,
            capability: None,
            change: None,
            length: None,
            path: None,
            mime_type: None,
            encoding: None,
            hashes: IndexMap::new(),
            lns: Vec::new(),
        }
    }

    pub fn url() -> Self {
        Self::new(EntryKind::Url)
    }

    pub fn sitemap() -> Self {
        Self::new(EntryKind::Sitemap)
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn root_name(&self) -> &'static str {
        self.kind.root_name()
    }

    pub fn loc(&self) -> Option<&str> {
        self.loc.as_deref()
    }

    pub fn set_loc(&mut self, loc: impl Into<String>) {
        self.loc = Some(loc.into());
    }

    pub fn last_modified(&self) -> Option<OffsetDateTime> {
        self.last_modified
    }

    pub fn set_last_modified(&mut self, last_modified: OffsetDateTime) {
        self.last_modified = Some(last_modified);
    }

    pub fn change_freq(&self) -> Option<&str> {
        self.change_freq.as_deref()
    }

    pub fn set_change_freq(&mut self, change_freq: impl Into<String>) {
        self.change_freq = Some(change_freq.into());
    }

    /// Which capability this entry's metadata belongs to.
    pub fn capability(&self) -> Option<&str> {
        self.capability.as_deref()
    }

    pub fn set_capability(&mut self, capability: impl Into<String>) {
        self.capability = Some(capability.into());
    }

    pub fn change(&self) -> Option<&str> {
        self.change.as_deref()
    }

    pub fn set_change(&mut self, change: impl Into<String>) {
        self.change = Some(change.into());
    }

    pub fn length(&self) -> Option<u64> {
        self.length
    }

    pub fn set_length(&mut self, length: u64) {
        self.length = Some(length);
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    /// MIME type; projects as the `type` attribute of `<rs:md>`.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn set_mime_type(&mut self, mime_type: impl Into<String>) {
        self.mime_type = Some(mime_type.into());
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = Some(encoding.into());
    }

    pub fn add_hash(&mut self, algorithm: impl Into<String>, value: impl Into<String>) {
        self.hashes.insert(algorithm.into(), value.into());
    }

    pub fn hashes(&self) -> &IndexMap<String, String> {
        &self.hashes
    }

    /// Construct a link, append it, and return it for further mutation.
    pub fn add_ln(&mut self, rel: impl Into<String>, href: impl Into<String>) -> &mut Ln {
        self.lns.push(Ln::with(rel, href));
        let last = self.lns.len() - 1;
        &mut self.lns[last]
    }

    /// Append a caller-built link.
    pub fn push_ln(&mut self, ln: Ln) {
        self.lns.push(ln);
    }

    /// Owned links, in insertion order.
    pub fn lns(&self) -> &[Ln] {
        &self.lns
    }

    /// Project this entry as its root element in the sitemap namespace.
    ///
    /// `loc` is always emitted, as an empty text node when unset. The
    /// `<rs:md>` child appears only when at least one of its attributes
    /// is set. Links keep insertion order.
    pub fn to_element(&self) -> Element {
        let mut element = Element::new(self.root_name(), NS_SITEMAP);

        let mut loc = Element::new("loc", NS_SITEMAP);
        loc.push_text(self.loc.as_deref().unwrap_or_default());
        element.push_element(loc);

        if let Some(last_modified) = self.last_modified {
            let mut lastmod = Element::new("lastmod", NS_SITEMAP);
            lastmod.push_text(vocab::format_timestamp(last_modified));
            element.push_element(lastmod);
        }
        if let Some(change_freq) = &self.change_freq {
            let mut changefreq = Element::new("changefreq", NS_SITEMAP);
            changefreq.push_text(change_freq);
            element.push_element(changefreq);
        }
        if let Some(md) = self.md_element() {
            element.push_element(md);
        }
        for ln in &self.lns {
            element.push_element(ln.to_element());
        }
        element
    }

    fn md_element(&self) -> Option<Element> {
        let mut md = Element::new("md", NS_RS);
        if let Some(capability) = &self.capability {
            md.set_attr("capability", capability);
        }
        if let Some(change) = &self.change {
            md.set_attr("change", change);
        }
        if let Some(length) = self.length {
            md.set_attr("length", length.to_string());
        }
        if let Some(path) = &self.path {
            md.set_attr("path", path);
        }
        if let Some(mime_type) = &self.mime_type {
            md.set_attr("type", mime_type);
        }
        if let Some(encoding) = &self.encoding {
            md.set_attr("encoding", encoding);
        }
        if !self.hashes.is_empty() {
            md.set_attr("hash", link::join_hashes(&self.hashes));
        }
        if md.attributes.is_empty() {
            None
        } else {
            Some(md)
        }
    }

    /// Rebuild an entry from its element form.
    pub fn from_element(kind: EntryKind, element: &Element) -> Result<Self> {
        let mut entry = Entry::new(kind);

        if let Some(loc) = element.child("loc", NS_SITEMAP) {
            let text = loc.text();
            if !text.is_empty() {
                entry.set_loc(text);
            }
        }
        if let Some(lastmod) = element.child("lastmod", NS_SITEMAP) {
            entry.set_last_modified(link::parse_timestamp_attr(lastmod.text().trim())?);
        }
        if let Some(changefreq) = element.child("changefreq", NS_SITEMAP) {
            entry.set_change_freq(changefreq.text());
        }

        if let Some(md) = element.child("md", NS_RS) {
            if let Some(capability) = md.attr("capability") {
                entry.set_capability(capability);
            }
            if let Some(change) = md.attr("change") {
                entry.set_change(change);
            }
            if let Some(length) = md.attr("length") {
                entry.set_length(link::parse_number(length, "length")?);
            }
            if let Some(path) = md.attr("path") {
                entry.set_path(path);
            }
            if let Some(mime_type) = md.attr("type") {
                entry.set_mime_type(mime_type);
            }
            if let Some(encoding) = md.attr("encoding") {
                entry.set_encoding(encoding);
            }
            if let Some(hash) = md.attr("hash") {
                entry.hashes = link::split_hashes(hash)?;
            }
        }

        for ln in element.children_named("ln", NS_RS) {
            entry.push_ln(Ln::from_element(ln)?);
        }
        Ok(entry)
    }
}
