//! XML text to element tree.
//!
//! Namespace-aware: prefixes are resolved to URIs while reading, so the
//! resulting tree can be matched on (local name, namespace URI) pairs no
//! matter which prefixes the producer chose. Comments, processing
//! instructions and doctype declarations are skipped; whitespace-only
//! text is trimmed away.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::{Error, Result};
use crate::xml::{Element, Node};

/// Parse a complete XML document into its root element.
pub fn parse(text: &str) -> Result<Element> {
    let mut reader = NsReader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolve, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(start) => {
                let element = open_element(&resolve, &start)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&resolve, &start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Structure("unbalanced closing tag".into()))?;
                close_element(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let content = text.unescape()?.into_owned();
                let parent = stack
                    .last_mut()
                    .ok_or_else(|| Error::Structure("text outside the root element".into()))?;
                parent.children.push(Node::Text(content));
            }
            Event::CData(data) => {
                let content = String::from_utf8(data.into_inner().into_owned())
                    .map_err(|_| Error::Structure("CDATA section is not valid UTF-8".into()))?;
                let parent = stack
                    .last_mut()
                    .ok_or_else(|| Error::Structure("text outside the root element".into()))?;
                parent.children.push(Node::Text(content));
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::Structure("unterminated element".into()));
    }
    root.ok_or_else(|| Error::Structure("document has no root element".into()))
}

fn open_element(resolve: &ResolveResult<'_>, start: &BytesStart<'_>) -> Result<Element> {
    let name = utf8(start.local_name().as_ref())?;
    let mut element = match resolve {
        ResolveResult::Bound(Namespace(uri)) => Element::new(name, utf8(uri)?),
        _ => Element::unqualified(name),
    };

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Attribute(e.to_string()))?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Attribute(e.to_string()))?;
        element.set_attr(utf8(attr.key.local_name().as_ref())?, value.into_owned());
    }
    Ok(element)
}

fn close_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => {
            if root.is_some() {
                return Err(Error::Structure("multiple root elements".into()));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| Error::Structure("name is not valid UTF-8".into()))
}
