//! Generic XML element tree.
//!
//! This is the collaborator boundary of the crate: the model projects into
//! this tree, and a `Document` can be repopulated from one. Elements carry
//! resolved namespace URIs, never prefixes; prefix handling lives in the
//! reader and writer.

use indexmap::IndexMap;

pub mod reader;
pub mod writer;

/// A namespace-qualified XML element.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

/// XML content node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Insert or overwrite an attribute. Insertion order is the order
    /// attributes are serialized in.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn push_element(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// First child element with the given local name and namespace URI.
    pub fn child(&self, name: &str, namespace: &str) -> Option<&Element> {
        self.children_named(name, namespace).next()
    }

    /// All child elements with the given local name and namespace URI,
    /// in document order.
    pub fn children_named<'a, 'b>(
        &'a self,
        name: &'b str,
        namespace: &'b str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'b> {
        self.elements()
            .filter(move |el| el.name == name && el.namespace.as_deref() == Some(namespace))
    }

    /// All child elements, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let Node::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }
}
