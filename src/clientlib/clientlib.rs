//! The client library record produced by a scan.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result},
};

use serde::Serialize;

use super::FieldValue;

/// Bytes per kilobyte used when reporting sizes.
pub const BYTES_PER_KB: f64 = 1024.0;

/// A client library folder found during a scan.
///
/// Records are created once by the scanner and never modified afterwards;
/// sorting only reorders them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClientLibrary {
    /// Base name of the client library folder
    pub name: String,

    /// Folder path relative to the scan root, `/`-separated, under the display prefix
    pub path: String,

    /// Sum of the gzip-compressed sizes of every file below the folder
    pub compressed_size: u64,

    /// Requested metadata fields that the sidecar document defines
    pub fields: BTreeMap<String, FieldValue>,
}

impl ClientLibrary {
    /// Create a new client library record.
    #[must_use]
    pub const fn new(
        name: String,
        path: String,
        compressed_size: u64,
        fields: BTreeMap<String, FieldValue>,
    ) -> Self {
        Self {
            name,
            path,
            compressed_size,
            fields,
        }
    }

    /// Compressed size in kilobytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_kb(&self) -> f64 {
        self.compressed_size as f64 / BYTES_PER_KB
    }

    /// Compressed size in kilobytes, rounded to two decimals.
    #[must_use]
    pub fn size_kb_rounded(&self) -> f64 {
        (self.size_kb() * 100.0).round() / 100.0
    }

    /// Display form of a field, if the sidecar defined it.
    #[must_use]
    pub fn field_display(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|field| field.display.as_str())
    }
}

impl Display for ClientLibrary {
    /// Format as `name (path, 1.23 KB)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} ({}, {:.2} KB)", self.name, self.path, self.size_kb())
    }
}
