//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use clientlib_report::config::file::{FileConfig, expand_tilde};
use clientlib_report::config::{
    ReportFormat, ReportOptions, ScanOptions, SortKey, SortOptions, SortOrder,
};
use clientlib_report::exclusion::DEFAULT_STRIP_PREFIX;
use clientlib_report::utils::UnreadablePolicy;

/// Command-line arguments controlling which folders are visited and what is
/// collected from them.
#[derive(Parser)]
struct ScanningArgs {
    /// Sidecar attribute to include as a report column (repeatable)
    ///
    /// Typical values are `categories`, `dependencies` and `embed`.
    /// Columns appear in the order given.
    #[arg(short = 'f', long = "field", action = clap::ArgAction::Append)]
    fields: Vec<String>,

    /// Directory to exclude, relative to the scanned root (repeatable)
    ///
    /// Matches the directory itself and everything below it, on whole path
    /// segments: `apps/vendor` excludes `apps/vendor/x` but not `apps/vendors`.
    #[arg(short = 'e', long = "exclude", action = clap::ArgAction::Append)]
    exclude: Vec<String>,

    /// Leading path segment ignored when matching exclusions [default: ui.apps]
    #[arg(long, conflicts_with = "no_strip_prefix")]
    strip_prefix: Option<String>,

    /// Match exclusions against the unmodified relative path
    #[arg(long)]
    no_strip_prefix: bool,

    /// Prefix shown in front of reported paths [default: name of the root directory]
    #[arg(long)]
    path_prefix: Option<String>,

    /// Leave a client library out of the report if any of its files is unreadable
    ///
    /// By default unreadable files are skipped and the library is reported
    /// with the size of its readable files.
    #[arg(long)]
    fail_on_unreadable: bool,

    /// Log every sidecar document that is read
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Command-line arguments controlling the report.
#[derive(Parser)]
struct ReportArgs {
    /// Output format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Write a spreadsheet instead of printing a table (same as `--format spreadsheet`)
    #[arg(long, conflicts_with = "format")]
    excel: bool,

    /// File written by the spreadsheet and csv formats
    /// [default: clientlib-report.xlsx, or clientlib-report.csv for csv]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Leave the path column out of the report
    #[arg(long)]
    hide_path: bool,

    /// Sort client libraries by size or by name [default: size]
    #[arg(long, value_enum)]
    sort: Option<SortKey>,

    /// Sort direction [default: ascending]
    #[arg(long, value_enum)]
    order: Option<SortOrder>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the configuration file values (defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "clientlib-report")]
#[command(
    about = "Report the compressed size and metadata of AEM client library folders"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Root of the content tree to scan (usually a `ui.apps` folder)
    ///
    /// Defaults to the current directory if not specified.
    dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long = "config", global = true)]
    config_file: Option<PathBuf>,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,

    /// Report options
    #[command(flatten)]
    report: ReportArgs,
}

impl Cli {
    /// Explicit configuration file given with `--config`.
    #[must_use]
    pub fn config_file(&self) -> Option<PathBuf> {
        self.config_file.as_deref().map(expand_tilde)
    }

    /// Resolve the root directory from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `root` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn root(&self, config: &FileConfig) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }

        config
            .root
            .as_deref()
            .map_or_else(|| PathBuf::from("."), expand_tilde)
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **fields**: CLI values if any, otherwise the config file list
    /// - **exclude**: merged from both sources (config values first, then CLI)
    /// - **strip prefix**: `--no-strip-prefix` > CLI > config (`""` disables) > `ui.apps`
    /// - **flags**: CLI flag `||` config value `||` `false`
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        let scanning = &config.scanning;

        let fields = if self.scanning.fields.is_empty() {
            scanning.fields.clone().unwrap_or_default()
        } else {
            self.scanning.fields.clone()
        };

        let mut exclude = scanning.exclude.clone().unwrap_or_default();
        exclude.extend(self.scanning.exclude.iter().cloned());

        let strip_prefix = if self.scanning.no_strip_prefix {
            None
        } else {
            self.scanning
                .strip_prefix
                .clone()
                .or_else(|| scanning.strip_prefix.clone())
                .or_else(|| Some(DEFAULT_STRIP_PREFIX.to_string()))
                .filter(|prefix| !prefix.is_empty())
        };

        let fail = self.scanning.fail_on_unreadable || scanning.fail_on_unreadable.unwrap_or(false);

        ScanOptions {
            verbose: self.scanning.verbose || scanning.verbose.unwrap_or(false),
            fields,
            exclude: Vec::new(),
            strip_prefix,
            path_prefix: self
                .scanning
                .path_prefix
                .clone()
                .or_else(|| scanning.path_prefix.clone()),
            unreadable: if fail {
                UnreadablePolicy::Fail
            } else {
                UnreadablePolicy::Skip
            },
        }
        .with_excludes(&exclude)
    }

    /// Extract report options from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > hardcoded default. An
    /// unrecognised format in the config file falls back to the table.
    #[must_use]
    pub fn report_options(&self, config: &FileConfig) -> ReportOptions {
        let report = &config.report;

        let format = if self.report.excel {
            ReportFormat::Spreadsheet
        } else {
            self.report.format.unwrap_or_else(|| {
                report
                    .format
                    .as_deref()
                    .and_then(|s| {
                        let parsed = ReportFormat::from_str(s.trim(), true).ok();
                        if parsed.is_none() {
                            warn!(format = s, "unknown report format in config file, using table");
                        }
                        parsed
                    })
                    .unwrap_or_default()
            })
        };

        ReportOptions {
            format,
            output: self
                .report
                .output
                .clone()
                .or_else(|| report.output.as_deref().map(expand_tilde)),
            hide_path: self.report.hide_path || report.hide_path.unwrap_or(false),
        }
    }

    /// Extract sorting options from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > default (size, ascending).
    /// An unknown sort key in the config file disables sorting, leaving the
    /// libraries in scan order.
    #[must_use]
    pub fn sort_options(&self, config: &FileConfig) -> SortOptions {
        let report = &config.report;

        let key = match (self.report.sort, report.sort.as_deref()) {
            (Some(key), _) => Some(key),
            (None, Some(raw)) => {
                let parsed = SortKey::parse(raw);
                if parsed.is_none() {
                    warn!(sort = raw, "unknown sort key in config file, keeping scan order");
                }
                parsed
            }
            (None, None) => Some(SortKey::Size),
        };

        let order = self
            .report
            .order
            .or_else(|| {
                report.order.as_deref().and_then(|raw| {
                    let parsed = SortOrder::parse(raw);
                    if parsed.is_none() {
                        warn!(order = raw, "unknown sort order in config file, using ascending");
                    }
                    parsed
                })
            })
            .unwrap_or_default();

        SortOptions { key, order }
    }
}
