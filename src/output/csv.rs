//! CSV renderer.
//!
//! Same columns as the spreadsheet, as plain comma-separated text. Sizes are
//! kilobytes rounded to two decimals.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::clientlib::ClientLibraries;

use super::{header_row, spreadsheet::SIZE_HEADER};

/// Write the report as CSV to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_csv<W: Write>(
    out: W,
    libraries: &ClientLibraries,
    fields: &[String],
    hide_path: bool,
) -> Result<()> {
    let mut wtr = ::csv::WriterBuilder::new().has_headers(true).from_writer(out);
    wtr.write_record(header_row(fields, hide_path, SIZE_HEADER))?;

    for library in libraries {
        let mut record = vec![library.name.clone()];
        if !hide_path {
            record.push(library.path.clone());
        }
        record.push(library.size_kb_rounded().to_string());
        record.extend(
            fields
                .iter()
                .map(|field| library.field_display(field).unwrap_or_default().to_string()),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the report as CSV to the file at `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file or its parent directory cannot be created, or
/// if writing fails.
pub fn write_csv_file(
    path: &Path,
    libraries: &ClientLibraries,
    fields: &[String],
    hide_path: bool,
) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, libraries, fields, hide_path)?;
    out.flush()?;

    Ok(())
}
