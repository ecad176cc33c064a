use indexmap::IndexMap;
use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::vocab::{self, NS_RS};
use crate::xml::Element;

// ---------------------------------------------------------------------------
// The Edge: <rs:ln>
// A typed link from a document or entry to another resource.
// ---------------------------------------------------------------------------
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ln {
    href: Option<String>,
    rel: Option<String>,
    pri: Option<u32>,
    mime_type: Option<String>,
    length: Option<u64>,
    modified: Option<OffsetDateTime>,
    path: Option<String>,
    encoding: Option<String>,
    hashes: IndexMap<String, String>,
}

impl Ln {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the common relation + target construction.
    pub fn with(rel: impl Into<String>, href: impl Into<String>) -> Self {
        let mut ln = Self::default();
        ln.set_rel(rel);
        ln.set_href(href);
        ln
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn set_href(&mut self, href: impl Into<String>) {
        self.href = Some(href.into());
    }

    pub fn rel(&self) -> Option<&str> {
        self.rel.as_deref()
    }

    pub fn set_rel(&mut self, rel: impl Into<String>) {
        self.rel = Some(rel.into());
    }

    pub fn pri(&self) -> Option<u32> {
        self.pri
    }

    pub fn set_pri(&mut self, pri: u32) {
        self.pri = Some(pri);
    }

    /// MIME type; projects as the `type` attribute.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn set_mime_type(&mut self, mime_type: impl Into<String>) {
        self.mime_type = Some(mime_type.into());
    }

    pub fn length(&self) -> Option<u64> {
        self.length
    }

    pub fn set_length(&mut self, length: u64) {
        self.length = Some(length);
    }

    pub fn modified(&self) -> Option<OffsetDateTime> {
        self.modified
    }

    pub fn set_modified(&mut self, modified: OffsetDateTime) {
        self.modified = Some(modified);
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = Some(encoding.into());
    }

    /// Insert or overwrite the value for a hash algorithm. The algorithm
    /// name is not validated; well-known identifiers live in [`vocab`].
    pub fn add_hash(&mut self, algorithm: impl Into<String>, value: impl Into<String>) {
        self.hashes.insert(algorithm.into(), value.into());
    }

    pub fn hashes(&self) -> &IndexMap<String, String> {
        &self.hashes
    }

    /// Project this link as an `<rs:ln>` element. Unset fields are omitted.
    pub fn to_element(&self) -> Element {
        let mut ln = Element::new("ln", NS_RS);
        if let Some(href) = &self.href {
            ln.set_attr("href", href);
        }
        if let Some(rel) = &self.rel {
            ln.set_attr("rel", rel);
        }
        if let Some(pri) = self.pri {
            ln.set_attr("pri", pri.to_string());
        }
        if let Some(mime_type) = &self.mime_type {
            ln.set_attr("type", mime_type);
        }
        if let Some(length) = self.length {
            ln.set_attr("length", length.to_string());
        }
        if let Some(modified) = self.modified {
            ln.set_attr("modified", vocab::format_timestamp(modified));
        }
        if let Some(path) = &self.path {
            ln.set_attr("path", path);
        }
        if let Some(encoding) = &self.encoding {
            ln.set_attr("encoding", encoding);
        }
        if !self.hashes.is_empty() {
            ln.set_attr("hash", join_hashes(&self.hashes));
        }
        ln
    }

    /// Rebuild a link from an `<rs:ln>` element.
    pub fn from_element(element: &Element) -> Result<Self> {
        let mut ln = Ln::new();
        if let Some(href) = element.attr("href") {
            ln.set_href(href);
        }
        if let Some(rel) = element.attr("rel") {
            ln.set_rel(rel);
        }
        if let Some(pri) = element.attr("pri") {
            ln.set_pri(parse_number(pri, "pri")?);
        }
        if let Some(mime_type) = element.attr("type") {
            ln.set_mime_type(mime_type);
        }
        if let Some(length) = element.attr("length") {
            ln.set_length(parse_number(length, "length")?);
        }
        if let Some(modified) = element.attr("modified") {
            ln.set_modified(parse_timestamp_attr(modified)?);
        }
        if let Some(path) = element.attr("path") {
            ln.set_path(path);
        }
        if let Some(encoding) = element.attr("encoding") {
            ln.set_encoding(encoding);
        }
        if let Some(hash) = element.attr("hash") {
            ln.hashes = split_hashes(hash)?;
        }
        Ok(ln)
    }
}

/// Space-joined `algorithm:value` pairs, in insertion order.
pub(crate) fn join_hashes(hashes: &IndexMap<String, String>) -> String {
    hashes
        .iter()
        .map(|(algorithm, value)| format!("{algorithm}:{value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn split_hashes(attr: &str) -> Result<IndexMap<String, String>> {
    let mut hashes = IndexMap::new();
    for pair in attr.split_whitespace() {
        let (algorithm, value) = pair
            .split_once(':')
            .ok_or_else(|| Error::Structure(format!("malformed hash pair '{pair}'")))?;
        hashes.insert(algorithm.to_string(), value.to_string());
    }
    Ok(hashes)
}

pub(crate) fn parse_timestamp_attr(value: &str) -> Result<OffsetDateTime> {
    vocab::parse_timestamp(value).map_err(|source| Error::Timestamp {
        value: value.to_string(),
        source,
    })
}

pub(crate) fn parse_number<T: std::str::FromStr>(value: &str, attribute: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Structure(format!("invalid {attribute} value '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{HASH_MD5, HASH_SHA_256, REL_DESCRIBES};

    #[test]
    fn unset_fields_are_omitted_from_projection() {
        let mut ln = Ln::new();
        ln.set_href("http://example.com/res1");

        let element = ln.to_element();
        assert_eq!(element.name, "ln");
        assert_eq!(element.namespace.as_deref(), Some(NS_RS));
        assert_eq!(element.attr("href"), Some("http://example.com/res1"));
        assert_eq!(element.attributes.len(), 1);
    }

    #[test]
    fn hash_attribute_joins_pairs_in_insertion_order() {
        let mut ln = Ln::with(REL_DESCRIBES, "http://example.com/res1");
        ln.add_hash(HASH_MD5, "abcdefg");
        ln.add_hash(HASH_SHA_256, "123456");

        let element = ln.to_element();
        assert_eq!(element.attr("hash"), Some("md5:abcdefg sha-256:123456"));
    }

    #[test]
    fn add_hash_overwrites_an_existing_algorithm() {
        let mut ln = Ln::new();
        ln.add_hash(HASH_MD5, "first");
        ln.add_hash(HASH_MD5, "second");

        assert_eq!(ln.hashes().len(), 1);
        assert_eq!(ln.hashes().get(HASH_MD5).map(String::as_str), Some("second"));
    }

    #[test]
    fn element_round_trip() {
        let mut ln = Ln::with(REL_DESCRIBES, "http://example.com/res1");
        ln.set_pri(45);
        ln.set_mime_type("application/pdf");
        ln.set_length(234);
        ln.set_modified(vocab::parse_timestamp("2013-01-03T09:00:00Z").unwrap());
        ln.set_path("/path/to/file");
        ln.set_encoding("ascii");
        ln.add_hash(HASH_MD5, "abcdefg");

        let rebuilt = Ln::from_element(&ln.to_element()).unwrap();
        assert_eq!(rebuilt, ln);
    }

    #[test]
    fn malformed_attributes_are_parse_errors() {
        let mut element = Element::new("ln", NS_RS);
        element.set_attr("length", "not-a-number");
        assert!(Ln::from_element(&element).is_err());

        let mut element = Element::new("ln", NS_RS);
        element.set_attr("modified", "2013-01-03");
        assert!(matches!(
            Ln::from_element(&element),
            Err(Error::Timestamp { .. })
        ));

        let mut element = Element::new("ln", NS_RS);
        element.set_attr("hash", "md5");
        assert!(Ln::from_element(&element).is_err());
    }
}
