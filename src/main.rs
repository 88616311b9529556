//! # clientlib-report
//!
//! A CLI tool that finds the AEM client library folders of a `ui.apps` content
//! tree and reports their gzip-compressed size together with selected metadata.
//!
//! ## Features
//!
//! - Detection of `cq:ClientLibraryFolder` nodes from `.content.xml` sidecars
//! - Compressed size of every library, nested libraries included
//! - Extraction of metadata fields such as `categories`, `dependencies` or `embed`
//! - Directory exclusions relative to the content root
//! - Table, Excel spreadsheet, CSV and JSON reports
//! - Persistent configuration via `~/.config/clientlib-report/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Report the client libraries below the current directory
//! clientlib-report
//!
//! # Show categories and embeds, largest libraries first
//! clientlib-report ui.apps -f categories -f embed --order descending
//!
//! # Write a spreadsheet without the path column
//! clientlib-report ui.apps --excel --hide-path -o report.xlsx
//! ```

mod cli;

use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Result, bail};
use clap::Parser;
use clientlib_report::{
    ReportFormat, ReportOptions, ReportRun, ScanOptions, Scanner, SortOptions, build_report,
    config::FileConfig,
    output::{JsonReport, render_table, write_csv_file, write_spreadsheet_file},
};
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive that overrides
/// the default log level.
const LOG_ENV: &str = "CLIENTLIB_REPORT_LOG";

/// Entry point for the clientlib-report application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function orchestrates the full pipeline: parse arguments, resolve the
/// layered configuration, scan the tree once and render the report.
///
/// # Errors
///
/// Returns errors for a missing or non-directory root, spreadsheet write
/// failures, or JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();
    let config_file = args.config_file();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command, config_file.as_deref());
    }

    let file_config = load_config(config_file.as_deref());

    let scan_options = args.scan_options(&file_config);
    init_logging(scan_options.verbose);

    let root = args.root(&file_config);
    let report_options = args.report_options(&file_config);
    let sort_options = args.sort_options(&file_config);

    let mut run = ReportRun::new();
    run.run(|| generate_report(&root, scan_options, &sort_options, &report_options))
        .unwrap_or(Ok(()))
}

/// Install the stderr log subscriber.
///
/// The level is `warn`, or `debug` for this crate when `verbose` is set. A
/// directive in `CLIENTLIB_REPORT_LOG` replaces either.
fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "warn,clientlib_report=debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("{} {e}", "Warning: Failed to initialise logging:".yellow());
    }
}

/// Scan `root` and emit the report in the requested format.
fn generate_report(
    root: &Path,
    scan_options: ScanOptions,
    sort_options: &SortOptions,
    report_options: &ReportOptions,
) -> Result<()> {
    let json_mode = report_options.format == ReportFormat::Json;
    let fields = scan_options.fields.clone();

    let scanner = Scanner::new(scan_options).with_quiet(json_mode);
    let libraries = build_report(&scanner, root, sort_options)?;

    match report_options.format {
        ReportFormat::Table => {
            println!("\n{}", "Client Library Details:".bold());
            if libraries.is_empty() {
                println!("{}", "No client libraries found.".yellow());
            } else {
                println!(
                    "{}",
                    render_table(&libraries, &fields, report_options.hide_path)
                );
            }
            println!(
                "Found {} client libraries, {} compressed in total",
                libraries.len(),
                libraries.total_compressed_size_formatted()
            );
        }
        ReportFormat::Spreadsheet => {
            let output = report_options.output_path();
            write_spreadsheet_file(&output, &libraries, &fields, report_options.hide_path)?;
            println!(
                "{} {}",
                "Spreadsheet successfully written to:".green(),
                output.display()
            );
        }
        ReportFormat::Csv => {
            let output = report_options.output_path();
            write_csv_file(&output, &libraries, &fields, report_options.hide_path)?;
            println!(
                "{} {}",
                "CSV file successfully written to:".green(),
                output.display()
            );
        }
        ReportFormat::Json => {
            let output = JsonReport::from_libraries(&libraries, report_options.hide_path);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# clientlib-report configuration
# All values shown are their defaults. Uncomment and change as needed.

# Content tree to scan (defaults to current directory when not set)
# root = "."

[scanning]
# Sidecar attributes reported as columns, in order
# fields = ["categories", "dependencies", "embed"]

# Directories to leave out, relative to the root
# exclude = []

# Leading path segment ignored when matching exclusions ("" disables)
# strip_prefix = "ui.apps"

# Prefix for reported paths (defaults to the name of the root directory)
# path_prefix = "ui.apps"

# Drop a library from the report when one of its files cannot be read
# fail_on_unreadable = false

# Log every sidecar document that is read
# verbose = false

[report]
# Output format: table, spreadsheet (xlsx), csv, json
# format = "table"

# File written by the spreadsheet and csv formats
# (defaults to clientlib-report.xlsx, or clientlib-report.csv for csv)
# output = "clientlib-report.xlsx"

# Leave the path column out
# hide_path = false

# Sort by: size, clientname
# sort = "size"

# Sort direction: ascending, descending
# order = "ascending"
"#;

/// Resolve the config file location: `--config` if given, else the default path.
fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(FileConfig::config_path)
}

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand, explicit: Option<&Path>) -> Result<()> {
    let Some(path) = resolve_config_path(explicit) else {
        bail!("Could not determine the config directory on this platform");
    };

    match cmd {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => show_config(&path)?,
        ConfigCommand::Init => init_config(&path)?,
    }
    Ok(())
}

/// Print the configuration file values, showing defaults for unset keys.
fn show_config(path: &Path) -> Result<()> {
    let config = if path.exists() {
        println!("Config file: {} (found)", path.display());
        FileConfig::load_from(path)?
    } else {
        println!(
            "Config file: {} (not found - showing defaults)",
            path.display()
        );
        FileConfig::default()
    };

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_list(val: Option<&[String]>) -> String {
        match val {
            Some(v) if !v.is_empty() => {
                let items: Vec<String> = v.iter().map(|s| format!("\"{s}\"")).collect();
                format!("[{}]", items.join(", "))
            }
            _ => "[]  (default)".to_string(),
        }
    }

    let root = config.root.as_ref().map_or_else(
        || "\".\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );
    let path_prefix = config.scanning.path_prefix.as_deref().map_or_else(
        || "(root directory name)  (default)".to_string(),
        |v| format!("\"{v}\""),
    );
    let output = config.report.output.as_ref().map_or_else(
        || "(clientlib-report.xlsx / .csv by format)  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );

    format!(
        "\
root               = {root}

[scanning]
fields             = {fields}
exclude            = {exclude}
strip_prefix       = {strip_prefix}
path_prefix        = {path_prefix}
fail_on_unreadable = {fail_on_unreadable}
verbose            = {verbose}

[report]
format             = {format}
output             = {output}
hide_path          = {hide_path}
sort               = {sort}
order              = {order}",
        fields = show_list(config.scanning.fields.as_deref()),
        exclude = show_list(config.scanning.exclude.as_deref()),
        strip_prefix = show_str(config.scanning.strip_prefix.as_deref(), "ui.apps"),
        fail_on_unreadable = show_bool(config.scanning.fail_on_unreadable, false),
        verbose = show_bool(config.scanning.verbose, false),
        format = show_str(config.report.format.as_deref(), "table"),
        hide_path = show_bool(config.report.hide_path, false),
        sort = show_str(config.report.sort.as_deref(), "size"),
        order = show_str(config.report.order.as_deref(), "ascending"),
    )
}

/// Write a default config template to `path` if it does not exist yet.
fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
///
/// An explicit `--config` file is read as given; otherwise the default
/// location is used when it exists.
fn load_config(explicit: Option<&Path>) -> FileConfig {
    let loaded = match explicit {
        Some(path) => FileConfig::load_from(path),
        None => FileConfig::load(),
    };

    match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    }
}
