//! Report configuration: sorting and output format.
//!
//! This module defines how the collected client libraries are ordered and
//! which renderer receives them.

use std::path::PathBuf;

use clap::ValueEnum;

/// Default file written by the spreadsheet renderer.
pub const DEFAULT_OUTPUT_FILE: &str = "clientlib-report.xlsx";

/// Default file written by the CSV renderer.
pub const DEFAULT_CSV_OUTPUT_FILE: &str = "clientlib-report.csv";

/// Key used to order client libraries in the report.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum SortKey {
    /// Sort by compressed size
    Size,

    /// Sort by client library name
    #[value(name = "clientname", alias = "name")]
    Name,
}

impl SortKey {
    /// Parse a sort key as written in the configuration file.
    ///
    /// Accepts `size`, `clientname` and `name`, case-insensitively. Returns
    /// `None` for anything else, which leaves the scan order untouched.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "size" => Some(Self::Size),
            "clientname" | "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Direction of the sort.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum SortOrder {
    /// Smallest or alphabetically first entries first
    #[default]
    #[value(alias = "asc")]
    Ascending,

    /// Largest or alphabetically last entries first
    #[value(alias = "desc")]
    Descending,
}

impl SortOrder {
    /// Parse a sort order as written in the configuration file.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_str(value.trim(), true).ok()
    }
}

/// Configuration for report ordering.
///
/// When `key` is `None` the libraries stay in scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortOptions {
    /// The key to sort by, or `None` to preserve scan order
    pub key: Option<SortKey>,

    /// Sort direction
    pub order: SortOrder,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            key: Some(SortKey::Size),
            order: SortOrder::Ascending,
        }
    }
}

/// Output renderer for the report.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum ReportFormat {
    /// Console table
    #[default]
    Table,

    /// Excel workbook (`.xlsx`) with a single sheet
    #[value(aliases = ["excel", "xlsx"])]
    Spreadsheet,

    /// Comma-separated values file
    Csv,

    /// A single JSON document on stdout
    Json,
}

/// Configuration for report rendering.
#[derive(Clone, Debug)]
pub struct ReportOptions {
    /// Which renderer to use
    pub format: ReportFormat,

    /// Destination file for the file renderers (`None` uses the format's default)
    pub output: Option<PathBuf>,

    /// Whether the path column is left out
    pub hide_path: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::Table,
            output: None,
            hide_path: false,
        }
    }
}

impl ReportOptions {
    /// File the report is written to: the configured one, or
    /// `clientlib-report.xlsx` / `clientlib-report.csv` depending on the format.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| match self.format {
            ReportFormat::Csv => PathBuf::from(DEFAULT_CSV_OUTPUT_FILE),
            _ => PathBuf::from(DEFAULT_OUTPUT_FILE),
        })
    }
}
