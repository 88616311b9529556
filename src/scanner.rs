//! Directory scanning and client library detection.
//!
//! This module provides the core traversal: it walks a content tree
//! depth-first, prunes excluded directories, reads every `.content.xml`
//! sidecar it meets and turns each client library folder into a
//! [`ClientLibrary`] record.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{
    clientlib::{ClientLibrary, extract_fields},
    config::ScanOptions,
    exclusion::{display_path, should_exclude},
    metadata::{SIDECAR_FILE_NAME, is_client_library, read_sidecar},
    utils::compressed_size,
};

/// Errors that abort a whole scan.
///
/// Everything else (unreadable sidecars, malformed XML, unreadable files) is
/// logged and only affects the folder concerned.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("The provided path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The scan root exists but is not a directory.
    #[error("The provided path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),
}

/// Directory scanner for client library folders.
///
/// The `Scanner` walks a content tree once per call to [`Scanner::collect`]
/// and holds no state between calls.
#[derive(Debug)]
pub struct Scanner {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,

    /// When `true`, suppresses the progress spinner (used by `--format json`).
    quiet: bool,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    #[must_use]
    pub const fn new(scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses the progress spinner).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// The options this scanner was built with.
    #[must_use]
    pub const fn options(&self) -> &ScanOptions {
        &self.scan_options
    }

    /// Walk `root` and collect every client library folder below it.
    ///
    /// Entries of each directory are visited in file-name order, so the
    /// returned sequence is reproducible for a given tree. Excluded
    /// directories are pruned together with everything below them.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootNotFound`] if `root` does not exist and
    /// [`ScanError::RootNotDirectory`] if it is not a directory. No other
    /// failure aborts the scan.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::path::Path;
    /// # use clientlib_report::{config::ScanOptions, scanner::Scanner};
    /// let scanner = Scanner::new(ScanOptions::default());
    /// let libraries = scanner.collect(Path::new("ui.apps")).unwrap();
    /// println!("Found {} client libraries", libraries.len());
    /// ```
    pub fn collect(&self, root: &Path) -> Result<Vec<ClientLibrary>, ScanError> {
        if !root.exists() {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::RootNotDirectory(root.to_path_buf()));
        }

        let prefix = self.display_prefix(root);
        let progress = self.progress_bar();

        let libraries: Vec<ClientLibrary> = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(root, entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(Self::is_sidecar)
            .filter_map(|entry| self.inspect_sidecar(root, &prefix, entry.path()))
            .inspect(|library| {
                progress.set_message(format!("Scanning... found {}", library.name));
            })
            .collect();

        progress.finish_and_clear();

        Ok(libraries)
    }

    /// Build the spinner shown while scanning.
    fn progress_bar(&self) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Scanning...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Prefix for reported paths: the configured one, or the root's own name.
    fn display_prefix(&self, root: &Path) -> String {
        if let Some(prefix) = &self.scan_options.path_prefix {
            return prefix.clone();
        }

        root.canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default()
    }

    /// Check whether a walk entry is a directory the exclusion rules prune.
    fn is_excluded_dir(&self, root: &Path, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && should_exclude(
                entry.path(),
                root,
                self.scan_options.strip_prefix.as_deref(),
                &self.scan_options.exclude,
            )
    }

    /// Check whether a walk entry is a sidecar document.
    fn is_sidecar(entry: &DirEntry) -> bool {
        entry.file_type().is_file() && entry.file_name() == SIDECAR_FILE_NAME
    }

    /// Turn a sidecar document into a record if its folder is a client library.
    ///
    /// Parse and measurement failures are logged and yield `None`.
    fn inspect_sidecar(&self, root: &Path, prefix: &str, sidecar: &Path) -> Option<ClientLibrary> {
        let dir = sidecar.parent()?;

        if self.scan_options.verbose {
            info!("Reading file: {}", sidecar.display());
        }

        let attributes = match read_sidecar(sidecar) {
            Ok(attributes) => attributes,
            Err(e) => {
                error!(path = %sidecar.display(), error = %e, "Error parsing XML content");
                return None;
            }
        };

        if !is_client_library(&attributes) {
            return None;
        }

        let size = match compressed_size(dir, self.scan_options.unreadable) {
            Ok(size) => size,
            Err(e) => {
                error!(
                    path = %dir.display(),
                    error = %e,
                    "Error measuring client library, leaving it out of the report"
                );
                return None;
            }
        };

        let fields = extract_fields(&attributes, &self.scan_options.fields);
        let relative = dir.strip_prefix(root).unwrap_or_else(|_| Path::new(""));
        let name = dir
            .file_name()
            .map_or_else(|| prefix.to_string(), |n| n.to_string_lossy().into_owned());

        Some(ClientLibrary::new(
            name,
            display_path(prefix, relative),
            size,
            fields,
        ))
    }
}
