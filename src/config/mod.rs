//! Configuration types for scanning and reporting.
//!
//! Options are layered: CLI argument > config file ([`FileConfig`]) >
//! hardcoded default.

pub mod file;
pub mod report;
pub mod scan;

pub use file::FileConfig;
pub use report::{ReportFormat, ReportOptions, SortKey, SortOptions, SortOrder};
pub use scan::ScanOptions;
