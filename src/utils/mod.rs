//! Utility functions and helpers.
//!
//! This module contains the measuring helpers used by the scanner, such as
//! gzip-based size computation.

pub mod size;

pub use size::{SizeError, UnreadablePolicy, compressed_size, gzip_len};
