//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control which folders are visited,
//! which metadata fields are collected and how measurement errors are
//! treated.

use std::path::PathBuf;

use crate::exclusion::{DEFAULT_STRIP_PREFIX, normalize_entry};
use crate::utils::UnreadablePolicy;

/// Configuration for directory scanning behavior.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Whether to log every sidecar document that is read
    pub verbose: bool,

    /// Sidecar attributes to extract for each client library, in column order
    pub fields: Vec<String>,

    /// Root-relative directories pruned from the traversal
    pub exclude: Vec<PathBuf>,

    /// Leading segment stripped before matching `exclude` (`None` disables stripping)
    pub strip_prefix: Option<String>,

    /// Prefix for reported paths (`None` uses the scan root's own name)
    pub path_prefix: Option<String>,

    /// What to do with unreadable files while measuring a library
    pub unreadable: UnreadablePolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            fields: Vec::new(),
            exclude: Vec::new(),
            strip_prefix: Some(DEFAULT_STRIP_PREFIX.to_string()),
            path_prefix: None,
            unreadable: UnreadablePolicy::Skip,
        }
    }
}

impl ScanOptions {
    /// Replace the exclusion list, normalizing each raw entry.
    ///
    /// Entries that normalize to an empty path are dropped.
    #[must_use]
    pub fn with_excludes<S: AsRef<str>>(mut self, entries: &[S]) -> Self {
        self.exclude = entries
            .iter()
            .filter_map(|entry| normalize_entry(entry.as_ref()))
            .collect();
        self
    }

    /// Replace the list of extracted fields.
    #[must_use]
    pub fn with_fields<S: AsRef<str>>(mut self, fields: &[S]) -> Self {
        self.fields = fields.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }
}
