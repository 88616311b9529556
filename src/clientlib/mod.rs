//! Client library records and their metadata fields.
//!
//! ## Main Parts
//!
//! - [`ClientLibrary`] - One client library folder with its compressed size
//! - [`ClientLibraries`] - The ordered result of a scan
//! - [`FieldValue`] - A normalized metadata field

#[allow(clippy::module_inception)]
pub mod clientlib;
pub mod fields;
pub mod libraries;

pub use clientlib::ClientLibrary;
pub use fields::{FieldValue, extract_fields};
pub use libraries::ClientLibraries;
