//! Element tree built from the XML event stream.
//!
//! BTLx carries its data in attributes, so text content is dropped and only
//! element names, attributes and nesting are kept.

use crate::error::{ConvertError, Result};
use crate::model::Coordinate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Default buffer capacity for XML reading (4KB)
const XML_BUFFER_CAPACITY: usize = 4096;

/// An XML element with its attributes and child elements.
#[derive(Debug, Clone, Default)]
pub(crate) struct Element {
    /// Local name (namespace prefix removed).
    pub name: String,
    /// Attributes by local name, in document order.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    /// Get an attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child with the given name, or a `MissingElement` error.
    pub fn required_child(&self, name: &str) -> Result<&Element> {
        self.child(name)
            .ok_or_else(|| ConvertError::missing_element(&self.name, name))
    }

    /// All children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Parse a required floating-point attribute.
    pub fn f64_attr(&self, name: &str) -> Result<f64> {
        let value = self
            .attr(name)
            .ok_or_else(|| ConvertError::MissingAttribute {
                element: self.name.clone(),
                attribute: name.to_string(),
            })?;
        parse_f64(&format!("{}@{}", self.name, name), value)
    }

    /// Parse an optional floating-point attribute.
    pub fn opt_f64_attr(&self, name: &str) -> Result<Option<f64>> {
        self.attr(name)
            .map(|value| parse_f64(&format!("{}@{}", self.name, name), value))
            .transpose()
    }

    /// Parse an optional unsigned integer attribute.
    pub fn opt_u32_attr(&self, name: &str) -> Result<Option<u32>> {
        self.attr(name)
            .map(|value| {
                value.trim().parse::<u32>().map_err(|_| {
                    ConvertError::invalid_value(
                        format!("{}@{}", self.name, name),
                        "an unsigned integer",
                        value,
                    )
                })
            })
            .transpose()
    }

    /// Read the `X`, `Y`, `Z` attributes of a coordinate element.
    pub fn coordinate(&self) -> Result<Coordinate> {
        Ok(Coordinate::new(
            self.f64_attr("X")?,
            self.f64_attr("Y")?,
            self.f64_attr("Z")?,
        ))
    }
}

/// Parse a finite floating-point value.
fn parse_f64(field: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConvertError::invalid_value(field, "a finite number", value)),
    }
}

/// Strip a namespace prefix from an element or attribute name.
fn local_name(name: &str) -> &str {
    match name.rfind(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

fn xml_error(reader: &Reader<&[u8]>, message: impl Into<String>) -> ConvertError {
    ConvertError::Xml {
        position: reader.buffer_position() as u64,
        message: message.into(),
    }
}

/// Convert a start tag into an element without children.
fn start_element(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<Element> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| xml_error(reader, err.to_string()))?
        .to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(reader, err.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| xml_error(reader, err.to_string()))?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|err| xml_error(reader, err.to_string()))?;
        let value = quick_xml::escape::unescape(raw)
            .map_err(|err| xml_error(reader, err.to_string()))?;
        attributes.push((local_name(key).to_string(), value.into_owned()));
    }

    Ok(Element {
        name: local_name(&name).to_string(),
        attributes,
        children: Vec::new(),
    })
}

/// Read a whole document into an element tree and return its root.
///
/// Fails on any well-formedness problem: syntax errors, mismatched or
/// unclosed tags, several root elements, or a DTD.
pub(crate) fn read_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| xml_error(&reader, err.to_string()))?;

        match event {
            Event::DocType(_) => {
                return Err(xml_error(
                    &reader,
                    "DTD declarations are not allowed in BTLx files",
                ));
            }
            Event::Start(ref e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(xml_error(&reader, "document has more than one root element"));
                }
                stack.push(start_element(&reader, e)?);
            }
            Event::Empty(ref e) => {
                let element = start_element(&reader, e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => {
                        return Err(xml_error(
                            &reader,
                            "document has more than one root element",
                        ))
                    }
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error(&reader, "unexpected closing tag"))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(
            &reader,
            format!("unexpected end of document, <{}> is not closed", open.name),
        ));
    }

    root.ok_or_else(|| xml_error(&reader, "document has no root element"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== read_tree tests ====================

    #[test]
    fn test_read_tree_nesting_and_attributes() {
        let root = read_tree(
            r#"<?xml version="1.0"?>
            <BTLx Version="2.0"><Project Name="Shed &amp; Co"><Parts/></Project></BTLx>"#,
        )
        .expect("Should parse");

        assert_eq!(root.name, "BTLx");
        assert_eq!(root.attr("Version"), Some("2.0"));
        let project = root.child("Project").expect("Project");
        assert_eq!(project.attr("Name"), Some("Shed & Co"));
        assert_eq!(project.children.len(), 1);
    }

    #[test]
    fn test_read_tree_strips_namespace_prefixes() {
        let root = read_tree(
            r#"<b:BTLx xmlns:b="https://www.design2machine.com" b:Version="1.1"><b:Project/></b:BTLx>"#,
        )
        .expect("Should parse");

        assert_eq!(root.name, "BTLx");
        assert_eq!(root.attr("Version"), Some("1.1"));
        assert_eq!(root.attributes.len(), 1);
        assert!(root.child("Project").is_some());
    }

    #[test]
    fn test_read_tree_mismatched_tag() {
        let err = read_tree("<BTLx><Project></BTLx>").unwrap_err();
        assert!(matches!(err, ConvertError::Xml { .. }));
    }

    #[test]
    fn test_read_tree_unclosed_tag() {
        let err = read_tree("<BTLx><Project>").unwrap_err();
        match err {
            ConvertError::Xml { message, .. } => assert!(message.contains("not closed")),
            other => panic!("Expected Xml error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_tree_rejects_doctype() {
        let err = read_tree("<!DOCTYPE BTLx><BTLx/>").unwrap_err();
        assert!(matches!(err, ConvertError::Xml { .. }));
    }

    #[test]
    fn test_read_tree_rejects_second_root() {
        let err = read_tree("<BTLx/><BTLx/>").unwrap_err();
        assert!(matches!(err, ConvertError::Xml { .. }));
    }

    #[test]
    fn test_read_tree_empty_document() {
        let err = read_tree("   ").unwrap_err();
        assert!(matches!(err, ConvertError::Xml { .. }));
    }

    // ==================== attribute helper tests ====================

    #[test]
    fn test_coordinate_attributes() {
        let root = read_tree(r#"<EndPoint X="1964.64" Y=" 1073.13 " Z="0"/>"#).unwrap();
        assert_eq!(
            root.coordinate().unwrap(),
            Coordinate::new(1964.64, 1073.13, 0.0)
        );
    }

    #[test]
    fn test_coordinate_missing_attribute() {
        let root = read_tree(r#"<EndPoint X="1" Y="2"/>"#).unwrap();
        match root.coordinate().unwrap_err() {
            ConvertError::MissingAttribute { element, attribute } => {
                assert_eq!(element, "EndPoint");
                assert_eq!(attribute, "Z");
            }
            other => panic!("Expected MissingAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let root = read_tree(r#"<EndPoint X="NaN" Y="inf" Z="0"/>"#).unwrap();
        assert!(matches!(
            root.coordinate().unwrap_err(),
            ConvertError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_optional_attributes() {
        let root = read_tree(r#"<Line Inclination="12.5" ReferencePlaneID="x"/>"#).unwrap();
        assert_eq!(root.opt_f64_attr("Inclination").unwrap(), Some(12.5));
        assert_eq!(root.opt_f64_attr("Missing").unwrap(), None);
        assert!(root.opt_u32_attr("ReferencePlaneID").is_err());
    }
}
