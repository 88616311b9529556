//! Extraction of configured metadata fields.
//!
//! Each requested attribute becomes a [`FieldValue`] holding both the
//! normalized list of values and the string shown in reports.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::metadata::{AttributeValue, Attributes};

/// Separator placed between values of a multi-valued field in reports.
pub const DISPLAY_SEPARATOR: &str = ",\n";

/// A metadata field of a client library, normalized for reporting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    /// The field's values. A single value becomes a one-element list.
    pub values: Vec<String>,

    /// The values joined with [`DISPLAY_SEPARATOR`].
    pub display: String,
}

impl FieldValue {
    /// Normalize an attribute value.
    ///
    /// Single values are kept verbatim. Every element of a multi-valued
    /// attribute is trimmed.
    #[must_use]
    pub fn from_attribute(value: &AttributeValue) -> Self {
        let values = match value {
            AttributeValue::Single(value) => vec![value.clone()],
            AttributeValue::Multi(values) => {
                values.iter().map(|v| v.trim().to_string()).collect()
            }
        };
        let display = values.join(DISPLAY_SEPARATOR);

        Self { values, display }
    }
}

/// Extract the requested fields from a client library's attributes.
///
/// Fields missing from `attributes` are left out of the result entirely.
/// Requesting the same name twice yields a single entry.
#[must_use]
pub fn extract_fields(attributes: &Attributes, names: &[String]) -> BTreeMap<String, FieldValue> {
    names
        .iter()
        .filter_map(|name| {
            attributes
                .get(name)
                .map(|value| (name.clone(), FieldValue::from_attribute(value)))
        })
        .collect()
}
