//! Compressed size measurement.
//!
//! The footprint of a client library is the sum of the gzip-compressed
//! lengths of every file below its folder, each file compressed on its own.
//! Compression always uses `flate2` at [`Compression::default()`] with an
//! empty gzip header, so the same bytes always give the same length.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use flate2::{Compression, write::GzEncoder};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// How unreadable entries below a measured folder are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnreadablePolicy {
    /// Leave the entry out of the total and keep going.
    #[default]
    Skip,

    /// Abort the measurement of the folder with an error.
    Fail,
}

/// Errors raised while measuring a folder under [`UnreadablePolicy::Fail`].
#[derive(Debug, Error)]
pub enum SizeError {
    /// A file could not be read or compressed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory walk itself failed (permissions, symlink loops, ...).
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Gzip `bytes` with the fixed configuration and return the compressed length.
///
/// # Errors
///
/// Only fails if the in-memory encoder reports an I/O error, which does not
/// happen for a `Vec<u8>` sink in practice.
pub fn gzip_len(bytes: &[u8]) -> io::Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;

    Ok(compressed.len() as u64)
}

/// Read a file fully and return its gzip-compressed length.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn compressed_file_size(path: &Path) -> io::Result<u64> {
    let bytes = fs::read(path)?;
    gzip_len(&bytes)
}

/// Sum the gzip-compressed sizes of every file below `path`.
///
/// The full physical subtree is measured: no exclusion rules apply here.
/// Symbolic links are followed and measured as their targets. Special files
/// (FIFOs, sockets, devices) are never read.
///
/// # Errors
///
/// With [`UnreadablePolicy::Fail`], returns the first read or walk error.
/// With [`UnreadablePolicy::Skip`] this function always succeeds.
pub fn compressed_size(path: &Path, policy: UnreadablePolicy) -> Result<u64, SizeError> {
    let mut total = 0u64;

    for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let failed = source.path().unwrap_or(path).to_path_buf();
                match policy {
                    UnreadablePolicy::Skip => {
                        debug!(path = %failed.display(), error = %source, "skipping unwalkable entry");
                        continue;
                    }
                    UnreadablePolicy::Fail => {
                        return Err(SizeError::Walk {
                            path: failed,
                            source,
                        });
                    }
                }
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match compressed_file_size(entry.path()) {
            Ok(size) => total += size,
            Err(source) => match policy {
                UnreadablePolicy::Skip => {
                    debug!(path = %entry.path().display(), error = %source, "skipping unreadable file");
                }
                UnreadablePolicy::Fail => {
                    return Err(SizeError::Read {
                        path: entry.into_path(),
                        source,
                    });
                }
            },
        }
    }

    Ok(total)
}
