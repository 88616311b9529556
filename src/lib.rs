//! # clientlib-report
//!
//! Measure and report the client libraries of an AEM `ui.apps` content tree.
//!
//! The tool walks a content package, finds every folder whose `.content.xml`
//! declares `jcr:primaryType="cq:ClientLibraryFolder"`, computes the sum of
//! the gzip-compressed sizes of its files, extracts configured metadata
//! fields (such as `categories` or `embed`) and prints a sorted report.
//!
//! ## Pipeline
//!
//! 1. [`scanner::Scanner`] walks the tree, pruning excluded directories
//! 2. [`metadata`] parses each sidecar and classifies its folder
//! 3. [`utils::size`] measures accepted folders
//! 4. [`clientlib::fields`] extracts the requested fields
//! 5. [`sorting`] orders the records for one of the [`output`] renderers

pub mod clientlib;
pub mod config;
pub mod exclusion;
pub mod metadata;
pub mod output;
pub mod scanner;
pub mod session;
pub mod sorting;
pub mod utils;

use std::path::Path;

pub use clientlib::{ClientLibraries, ClientLibrary, FieldValue};
pub use config::{ReportFormat, ReportOptions, ScanOptions, SortKey, SortOptions, SortOrder};
pub use scanner::{ScanError, Scanner};
pub use session::{ReportRun, RunState};

/// Scan `root` and return its client libraries in report order.
///
/// # Errors
///
/// Returns a [`ScanError`] if `root` is missing or not a directory.
pub fn build_report(
    scanner: &Scanner,
    root: &Path,
    sort_opts: &SortOptions,
) -> Result<ClientLibraries, ScanError> {
    let mut libraries: ClientLibraries = scanner.collect(root)?.into();
    libraries.sort(sort_opts);
    Ok(libraries)
}
