//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/clientlib-report/config.toml` (or the
//! platform-specific equivalent), or from a file given with `--config`.
//! Configuration file values serve as defaults that can be overridden by CLI
//! arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! root = "~/work/site/ui.apps"
//!
//! [scanning]
//! fields = ["categories", "dependencies", "embed"]
//! exclude = ["apps/site/clientlibs/vendor"]
//! strip_prefix = "ui.apps"   # "" disables stripping
//! path_prefix = "ui.apps"
//! fail_on_unreadable = false
//! verbose = false
//!
//! [report]
//! format = "table"           # table, spreadsheet, csv, json
//! output = "clientlib-report.xlsx"
//! hide_path = false
//! sort = "size"              # size, clientname
//! order = "ascending"        # ascending, descending
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Default root directory to scan
    pub root: Option<PathBuf>,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,

    /// Report options
    #[serde(default)]
    pub report: FileReportConfig,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileScanConfig {
    /// Sidecar attributes to extract
    pub fields: Option<Vec<String>>,

    /// Root-relative directories to exclude
    pub exclude: Option<Vec<String>>,

    /// Leading segment stripped before matching exclusions (empty disables)
    pub strip_prefix: Option<String>,

    /// Prefix for reported paths
    pub path_prefix: Option<String>,

    /// Whether unreadable files drop their library from the report
    pub fail_on_unreadable: Option<bool>,

    /// Whether to log every sidecar document read
    pub verbose: Option<bool>,
}

/// Report options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileReportConfig {
    /// Output format (`"table"`, `"spreadsheet"`, `"csv"`, `"json"`)
    pub format: Option<String>,

    /// Output file of the spreadsheet and csv formats
    pub output: Option<PathBuf>,

    /// Whether to hide the path column
    pub hide_path: Option<bool>,

    /// Sort key (`"size"`, `"clientname"`)
    pub sort: Option<String>,

    /// Sort order (`"ascending"`, `"descending"`)
    pub order: Option<String>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/clientlib-report/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("clientlib-report").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// contains invalid TOML.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}
