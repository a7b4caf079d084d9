//! XML helpers behind the styled view and the structure pane
//!
//! Validation and structure extraction use roxmltree; pretty-printing is a
//! quick-xml event round-trip. Segment markers are HTML comments, so a
//! marker-bearing document is still well-formed XML and survives
//! formatting with its markers intact.

use quick_xml::events::{BytesDecl, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to format or inspect a document as XML
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlFormatError {
    #[error("invalid XML: {0}")]
    Invalid(String),
    #[error("XML rewrite failed: {0}")]
    Rewrite(String),
}

/// One element in the structure tree
///
/// Attributes keep document order; `text` is the element's leading text,
/// trimmed, or none when blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlNodeInfo {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlNodeInfo>,
}

/// Well-formedness check: `(true, None)` or `(false, Some(message))`
///
/// Blank content counts as valid; only non-blank text is parsed.
pub fn validate_xml(text: &str) -> (bool, Option<String>) {
    if text.trim().is_empty() {
        return (true, None);
    }
    match roxmltree::Document::parse(text) {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    }
}

/// Pretty-print a document: XML declaration plus 2-space indentation
///
/// Comments (and with them segment markers) are preserved. Blank input
/// passes through unchanged. Non-blank input must be well-formed; any
/// pre-existing declaration is replaced.
pub fn format_xml(text: &str) -> Result<String, XmlFormatError> {
    if text.trim().is_empty() {
        return Ok(text.to_string());
    }

    // Reject malformed input up front; the event rewrite below is too
    // forgiving to be the well-formedness judge.
    if let Err(e) = roxmltree::Document::parse(text) {
        return Err(XmlFormatError::Invalid(e.to_string()));
    }

    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| XmlFormatError::Rewrite(e.to_string()))?;

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Decl(_)) => {}
            Ok(event) => writer
                .write_event(event)
                .map_err(|e| XmlFormatError::Rewrite(e.to_string()))?,
            Err(e) => return Err(XmlFormatError::Rewrite(e.to_string())),
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| XmlFormatError::Rewrite(e.to_string()))
}

/// Element tree of a document, rooted at its document element
pub fn xml_structure(text: &str) -> Result<XmlNodeInfo, XmlFormatError> {
    let doc =
        roxmltree::Document::parse(text).map_err(|e| XmlFormatError::Invalid(e.to_string()))?;
    Ok(node_info(doc.root_element()))
}

fn node_info(node: roxmltree::Node) -> XmlNodeInfo {
    XmlNodeInfo {
        tag: node.tag_name().name().to_string(),
        attributes: node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect(),
        text: node
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        children: node
            .children()
            .filter(|c| c.is_element())
            .map(node_info)
            .collect(),
    }
}
