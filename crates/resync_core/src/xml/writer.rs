//! Element tree to XML text.
//!
//! Emits the two-namespace document form: the sitemap namespace as the
//! default, the ResourceSync terms namespace bound to the `rs` prefix on
//! the root element.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};
use crate::vocab::{NS_RS, NS_SITEMAP, RS_PREFIX};
use crate::xml::{Element, Node};

/// Render an element tree as a complete XML document string.
pub fn serialise(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    write_element(&mut writer, root, true)?;

    let text = String::from_utf8(writer.into_inner()).map_err(write_error)?;
    tracing::trace!(bytes = text.len(), "serialised element tree");
    Ok(text)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element, is_root: bool) -> Result<()> {
    let name = qualified_name(element);
    let mut start = BytesStart::new(name.clone());

    if is_root {
        start.push_attribute(("xmlns", NS_SITEMAP));
        let rs_decl = format!("xmlns:{RS_PREFIX}");
        start.push_attribute((rs_decl.as_str(), NS_RS));
    }
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    for child in &element.children {
        match child {
            Node::Element(el) => write_element(writer, el, false)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_error)
}

fn qualified_name(element: &Element) -> String {
    match element.namespace.as_deref() {
        Some(NS_RS) => format!("{RS_PREFIX}:{}", element.name),
        _ => element.name.clone(),
    }
}

fn write_error(err: impl std::fmt::Display) -> Error {
    Error::Write(err.to_string())
}
