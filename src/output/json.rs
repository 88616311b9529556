//! Structured JSON output for scripting and piping.
//!
//! When `--format json` is passed, these structures are serialized to stdout
//! as a single JSON object, replacing all human-readable output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::clientlib::{ClientLibraries, ClientLibrary, FieldValue};

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// Client libraries in report order.
    pub libraries: Vec<JsonLibraryEntry>,

    /// Aggregated summary statistics.
    pub summary: JsonSummary,
}

/// A single client library in the JSON output.
#[derive(Debug, Serialize)]
pub struct JsonLibraryEntry {
    /// Folder name.
    pub name: String,

    /// Display path, omitted when the path column is hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Compressed size in bytes.
    pub compressed_size: u64,

    /// Compressed size in kilobytes, rounded to two decimals.
    pub compressed_size_kb: f64,

    /// Extracted metadata fields.
    pub fields: BTreeMap<String, FieldValue>,
}

/// Aggregated summary across all reported libraries.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    /// Number of client libraries found.
    pub count: usize,

    /// Sum of all compressed sizes in bytes.
    pub total_compressed_size: u64,

    /// Human-readable total (e.g. `"12.3 KiB"`).
    pub total_compressed_size_formatted: String,
}

impl JsonReport {
    /// Build the JSON document for a set of libraries.
    #[must_use]
    pub fn from_libraries(libraries: &ClientLibraries, hide_path: bool) -> Self {
        Self {
            libraries: libraries
                .iter()
                .map(|library| JsonLibraryEntry::from_library(library, hide_path))
                .collect(),
            summary: JsonSummary {
                count: libraries.len(),
                total_compressed_size: libraries.total_compressed_size(),
                total_compressed_size_formatted: libraries.total_compressed_size_formatted(),
            },
        }
    }
}

impl JsonLibraryEntry {
    /// Convert a `ClientLibrary` into a `JsonLibraryEntry`.
    #[must_use]
    pub fn from_library(library: &ClientLibrary, hide_path: bool) -> Self {
        Self {
            name: library.name.clone(),
            path: (!hide_path).then(|| library.path.clone()),
            compressed_size: library.compressed_size,
            compressed_size_kb: library.size_kb_rounded(),
            fields: library.fields.clone(),
        }
    }
}
