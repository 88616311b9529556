//! Report renderers.
//!
//! Renderers consume the ordered [`ClientLibraries`](crate::clientlib::ClientLibraries)
//! and never influence how they were collected. Every renderer lays out the
//! same columns: name, optional path, compressed size, then one column per
//! requested field in configuration order.

pub mod csv;
pub mod json;
pub mod spreadsheet;
pub mod table;

pub use csv::{write_csv, write_csv_file};
pub use json::JsonReport;
pub use spreadsheet::{SHEET_NAME, build_workbook, write_spreadsheet_file};
pub use table::render_table;

/// Build the header row shared by the table and spreadsheet renderers.
#[must_use]
pub fn header_row(fields: &[String], hide_path: bool, size_header: &str) -> Vec<String> {
    let mut header = vec!["Name".to_string()];
    if !hide_path {
        header.push("Path".to_string());
    }
    header.push(size_header.to_string());
    header.extend(fields.iter().cloned());
    header
}
