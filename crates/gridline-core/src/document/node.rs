//! Document elements and their typed accessors.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while reading or writing position documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A required child element is absent.
    #[error("missing element <{name}>")]
    MissingElement { name: String },

    /// A required attribute is absent from an element.
    #[error("missing attribute {attribute:?} on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    /// An attribute is present but its value cannot be interpreted.
    #[error("invalid value {value:?} for attribute {attribute:?} on <{element}>")]
    InvalidValue {
        element: String,
        attribute: String,
        value: String,
    },

    /// The element at hand is not the one the reader expected.
    #[error("expected element <{expected}>, found <{found}>")]
    UnexpectedElement { expected: String, found: String },

    /// An I/O failure while emitting the document.
    #[error("failed to write position document")]
    Io(#[from] std::io::Error),
}

/// One node of a position document: a name, attributes, and child elements.
///
/// Attribute order is normalized (sorted by name) so that rendering the same
/// logical element always produces identical text.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    /// Builder-style child insertion.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child element.
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// The element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fails with [`DocumentError::UnexpectedElement`] unless this element has
    /// the given name.
    pub fn expect_name(&self, expected: &str) -> Result<(), DocumentError> {
        if self.name == expected {
            Ok(())
        } else {
            Err(DocumentError::UnexpectedElement {
                expected: expected.to_string(),
                found: self.name.clone(),
            })
        }
    }

    /// Looks up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Looks up an attribute value, failing if it is absent.
    pub fn require_attr(&self, name: &str) -> Result<&str, DocumentError> {
        self.attr(name).ok_or_else(|| DocumentError::MissingAttribute {
            element: self.name.clone(),
            attribute: name.to_string(),
        })
    }

    /// Parses a required attribute into `T`.
    ///
    /// Absence is [`DocumentError::MissingAttribute`]; an unparsable value is
    /// [`DocumentError::InvalidValue`] naming the element, attribute, and the
    /// offending text.
    pub fn parse_attr<T: FromStr>(&self, name: &str) -> Result<T, DocumentError> {
        let raw = self.require_attr(name)?;
        raw.parse().map_err(|_| DocumentError::InvalidValue {
            element: self.name.clone(),
            attribute: name.to_string(),
            value: raw.to_string(),
        })
    }

    /// All child elements, in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Finds the first child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Finds the first child with the given name, failing if there is none.
    pub fn require_child(&self, name: &str) -> Result<&Element, DocumentError> {
        self.child(name).ok_or_else(|| DocumentError::MissingElement {
            name: name.to_string(),
        })
    }

    /// Renders this element and its subtree as indented XML text.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.render(&mut out, 0);
        out
    }

    fn render(&self, out: &mut String, depth: usize) {
        let pad = "    ".repeat(depth);
        out.push_str(&pad);
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>\n");
        } else {
            out.push_str(">\n");
            for child in &self.children {
                child.render(out, depth + 1);
            }
            out.push_str(&pad);
            out.push_str("</");
            out.push_str(&self.name);
            out.push_str(">\n");
        }
    }
}

/// Escapes the XML attribute-value metacharacters.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
