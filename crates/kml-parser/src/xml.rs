//! Owned XML element tree built on quick-xml.
//!
//! The converter needs random access to children (`LatLonBox/north`,
//! `TimeSpan/begin`, ...) so the streaming reader is folded into a small tree
//! first. Element lookups compare local names, ignoring namespace prefixes.

use overlay_common::{ConvertError, ConvertResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with its attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified name as written (`kml:Document`, `GroundOverlay`)
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Name with any namespace prefix removed.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }

    pub fn is(&self, local_name: &str) -> bool {
        self.local_name() == local_name
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Child elements with the given local name, in document order.
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.is(local_name))
    }

    /// First child element with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.is(local_name))
    }

    /// Direct text content (text and CDATA children), trimmed.
    ///
    /// Attributes do not affect the result, so `<name>A</name>` and
    /// `<name xml:lang="en">A</name>` read the same.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.children {
            if let XmlNode::Text(t) = node {
                text.push_str(t);
            }
        }
        text.trim().to_string()
    }

    /// Trimmed text of the first matching child, `None` when absent or empty.
    pub fn child_text(&self, local_name: &str) -> Option<String> {
        self.child(local_name)
            .map(XmlElement::text)
            .filter(|t| !t.is_empty())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a complete XML document and return its root element.
pub fn parse_document(xml: &str) -> ConvertResult<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ConvertError::Xml(format!(
                "parse error at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => stack.push(start_element(&e)?),
            Event::Empty(e) => {
                let element = start_element(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ConvertError::Xml("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| ConvertError::Xml(format!("invalid text content: {}", e)))?;
                push_text(&mut stack, text.into_owned());
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                push_text(&mut stack, text);
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ConvertError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| ConvertError::Xml("document has no root element".to_string()))
}

fn start_element(start: &BytesStart<'_>) -> ConvertResult<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));

    for attr in start.attributes() {
        let attr = attr.map_err(|e| ConvertError::Xml(format!("invalid attribute: {}", e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| ConvertError::Xml(format!("invalid attribute value: {}", e)))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> ConvertResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ConvertError::Xml(format!(
                "multiple root elements (second is <{}>)",
                element.name
            )))
        }
    }
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: String) {
    // Text outside the root element carries no meaning
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Text(text));
    }
}
