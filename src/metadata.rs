//! Sidecar metadata parsing and client library classification.
//!
//! Every folder of a content package may carry a `.content.xml` file whose
//! root element describes the folder as a JCR node. This module turns that
//! document into an [`Attributes`] set and answers whether the folder is a
//! client library.
//!
//! Attribute values follow the JCR document-view serialization used by
//! content packages:
//!
//! - `{Boolean}true` carries a type hint, which is dropped
//! - `[a,b,c]` is a multi-valued property (`\,` escapes a literal comma)
//! - anything else is a single string value
//!
//! `jcr:primaryType` is the exception: it is kept exactly as written, so a
//! classification never matches a decorated value.

use std::{collections::BTreeMap, fs, path::Path};

use quick_xml::{Reader, events::Event};
use thiserror::Error;

/// Name of the sidecar file holding a folder's node definition.
pub const SIDECAR_FILE_NAME: &str = ".content.xml";

/// Attribute carrying the node's primary type.
pub const PRIMARY_TYPE_ATTRIBUTE: &str = "jcr:primaryType";

/// Primary type identifying a client library folder.
pub const CLIENT_LIBRARY_TYPE: &str = "cq:ClientLibraryFolder";

/// Errors raised while reading or parsing a sidecar document.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The sidecar file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// The document contains no element at all.
    #[error("document has no root element")]
    NoRootElement,

    /// The document ended while elements were still open.
    #[error("document ended with {0} unclosed element(s)")]
    Unclosed(usize),

    /// Content was found after the root element was closed.
    #[error("unexpected content after the root element")]
    TrailingContent,
}

/// A single attribute value of a sidecar root element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    /// A plain string value.
    Single(String),

    /// A multi-valued property, in document order.
    Multi(Vec<String>),
}

impl AttributeValue {
    /// Return the value as a string slice when it is single-valued.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(_) => None,
        }
    }
}

/// The attribute set of a sidecar document's root element.
///
/// Keys are qualified attribute names exactly as written in the document
/// (for example `jcr:primaryType` or `categories`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    /// Look up an attribute by its qualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    /// The node's `jcr:primaryType`, if present and single-valued.
    #[must_use]
    pub fn primary_type(&self) -> Option<&str> {
        self.get(PRIMARY_TYPE_ATTRIBUTE)
            .and_then(AttributeValue::as_single)
    }

    /// Number of attributes on the root element.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the root element carries no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AttributeValue)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Decide whether a folder is a client library from its sidecar attributes.
///
/// Only an exact, case-sensitive match of `jcr:primaryType` against
/// `cq:ClientLibraryFolder` qualifies. A missing attribute never does.
#[must_use]
pub fn is_client_library(attributes: &Attributes) -> bool {
    attributes.primary_type() == Some(CLIENT_LIBRARY_TYPE)
}

/// Read a sidecar file from disk and parse its root attributes.
///
/// # Errors
///
/// Returns [`MetadataError::Io`] when the file cannot be read as UTF-8 text,
/// or any parse error from [`parse_attributes`].
pub fn read_sidecar(path: &Path) -> Result<Attributes, MetadataError> {
    let content = fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_attributes(&content)
}

/// Parse an XML document and return the attribute set of its root element.
///
/// The whole document is read so that malformed trailing content is reported
/// instead of silently accepted.
///
/// # Errors
///
/// Returns a [`MetadataError`] if the document is not well-formed, has no
/// root element, or carries content after the root element.
pub fn parse_attributes(xml: &str) -> Result<Attributes, MetadataError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<Attributes> = None;
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| MetadataError::Malformed(e.to_string()))?;

        match &event {
            Event::Start(element) | Event::Empty(element) if depth == 0 => {
                if root.is_some() {
                    return Err(MetadataError::TrailingContent);
                }

                let mut attributes = BTreeMap::new();
                for attribute in element.attributes() {
                    let attribute =
                        attribute.map_err(|e| MetadataError::Malformed(e.to_string()))?;
                    let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                    let value = attribute
                        .unescape_value()
                        .map_err(|e| MetadataError::Malformed(e.to_string()))?;
                    let value = if name == PRIMARY_TYPE_ATTRIBUTE {
                        AttributeValue::Single(value.into_owned())
                    } else {
                        decode_value(&value)
                    };
                    attributes.insert(name, value);
                }
                root = Some(Attributes(attributes));

                if matches!(event, Event::Start(_)) {
                    depth = 1;
                }
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    MetadataError::Malformed("closing tag without opening tag".to_string())
                })?;
            }
            Event::Text(text) if depth == 0 && root.is_some() => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(MetadataError::TrailingContent);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(MetadataError::Unclosed(depth));
    }

    root.ok_or(MetadataError::NoRootElement)
}

/// Decode a document-view attribute value.
fn decode_value(raw: &str) -> AttributeValue {
    // A leading backslash escapes a literal `{` or `[`
    if let Some(rest) = raw.strip_prefix('\\')
        && (rest.starts_with('{') || rest.starts_with('['))
    {
        return AttributeValue::Single(rest.to_string());
    }

    let value = strip_type_hint(raw);

    match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(inner) => AttributeValue::Multi(split_multi_value(inner)),
        None => AttributeValue::Single(value.to_string()),
    }
}

/// Drop a `{Type}` prefix such as `{Boolean}` or `{Long}`.
fn strip_type_hint(raw: &str) -> &str {
    if let Some(rest) = raw.strip_prefix('{')
        && let Some(end) = rest.find('}')
    {
        let hint = &rest[..end];
        if !hint.is_empty() && hint.chars().all(|c| c.is_ascii_alphabetic()) {
            return &rest[end + 1..];
        }
    }
    raw
}

/// Split the inside of `[...]` on unescaped commas.
fn split_multi_value(inner: &str) -> Vec<String> {
    if inner.is_empty() {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ',' => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    values.push(current);

    values
}
