//! Minimal owned XML tree used to read API responses.
//!
//! Responses are parsed with `quick-xml`'s event reader into [`XmlNode`]
//! values. Comments, processing instructions and the declaration are skipped,
//! CDATA sections are folded into the element text.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::Error;

/// One XML element with its attributes, text content and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Parses a complete document and returns its root element.
    pub fn parse(input: &str) -> Result<XmlNode, Error> {
        let mut reader = Reader::from_str(input);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(element(&e)?),
                Ok(Event::Empty(e)) => {
                    let node = element(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let mut node = stack
                        .pop()
                        .ok_or_else(|| malformed("unexpected closing tag"))?;
                    // indentation between child elements
                    if !node.children.is_empty() && node.text.trim().is_empty() {
                        node.text.clear();
                    }
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(|e| malformed(&e.to_string()))?;
                    push_text(&mut stack, &text)?;
                }
                Ok(Event::CData(e)) => {
                    let raw = e.into_inner();
                    push_text(&mut stack, &String::from_utf8_lossy(&raw))?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(malformed(&format!(
                        "at position {}: {}",
                        reader.error_position(),
                        e
                    )))
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(malformed(&format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| malformed("document has no root element"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content exactly as sent, CDATA included.
    ///
    /// Whitespace-only text of an element that has children is dropped as
    /// formatting.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// First child element with the given tag name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlNode::text)
    }

    /// `true` when the element carries neither attributes nor children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.attributes.is_empty()
    }

    /// Renders this node as a standalone UTF-8 document.
    pub fn to_xml_string(&self) -> Result<String, Error> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| render_failed(&e.to_string()))?;
        write_node(&mut writer, self).map_err(|e| render_failed(&e.to_string()))?;
        let buf = writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| render_failed(&e.to_string()))
    }
}

fn element(start: &BytesStart<'_>) -> Result<XmlNode, Error> {
    let mut node = XmlNode::new(&String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| malformed(&e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| malformed(&e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<(), Error> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(malformed("multiple root elements"));
    }
    *root = Some(node);
    Ok(())
}

fn push_text(stack: &mut [XmlNode], text: &str) -> Result<(), Error> {
    match stack.last_mut() {
        Some(node) => {
            node.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(malformed("text outside of the root element")),
    }
}

fn write_node<W: std::io::Write>(
    writer: &mut Writer<W>,
    node: &XmlNode,
) -> Result<(), quick_xml::Error> {
    let start = BytesStart::new(node.name.as_str()).with_attributes(
        node.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );
    if node.text.is_empty() && node.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    if !node.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&node.text)))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
    Ok(())
}

fn malformed(msg: &str) -> Error {
    tracing::error!("Failed to parse XML: {}", msg);
    Error::MalformedResponse(format!("invalid XML: {}", msg))
}

fn render_failed(msg: &str) -> Error {
    Error::MalformedResponse(format!("failed to render XML: {}", msg))
}
