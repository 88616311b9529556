//! Spreadsheet renderer.
//!
//! Writes the report as an Excel workbook with a single sheet named
//! `Client Library Details`. Sizes are numeric cells holding kilobytes
//! rounded to two decimals, so they stay sortable inside the spreadsheet.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};

use crate::clientlib::ClientLibraries;

use super::header_row;

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Client Library Details";

/// Header of the size column.
pub const SIZE_HEADER: &str = "Compressed Size (KB)";

const NAME_WIDTH: f64 = 30.0;
const PATH_WIDTH: f64 = 50.0;
const SIZE_WIDTH: f64 = 20.0;
const FIELD_WIDTH: f64 = 50.0;

/// Build the report workbook in memory.
///
/// # Errors
///
/// Returns an [`XlsxError`] if a cell or column setting is rejected, for
/// example when there are more field columns than a worksheet can hold.
pub fn build_workbook(
    libraries: &ClientLibraries,
    fields: &[String],
    hide_path: bool,
) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let size_format = Format::new().set_num_format("0.00");
    let wrap_format = Format::new().set_text_wrap();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let mut widths = vec![NAME_WIDTH];
    if !hide_path {
        widths.push(PATH_WIDTH);
    }
    widths.push(SIZE_WIDTH);
    widths.extend(fields.iter().map(|_| FIELD_WIDTH));

    for ((col, title), width) in (0..).zip(header_row(fields, hide_path, SIZE_HEADER)).zip(widths) {
        let col: ColNum = col;
        worksheet.write_string(0, col, title)?;
        worksheet.set_column_width(col, width)?;
    }

    for (row, library) in (1..).zip(libraries) {
        let row: RowNum = row;
        let mut col: ColNum = 0;

        worksheet.write_string(row, col, &library.name)?;
        col += 1;

        if !hide_path {
            worksheet.write_string(row, col, &library.path)?;
            col += 1;
        }

        worksheet.write_number_with_format(row, col, library.size_kb_rounded(), &size_format)?;
        col += 1;

        for field in fields {
            if let Some(display) = library.field_display(field) {
                worksheet.write_string_with_format(row, col, display, &wrap_format)?;
            }
            col += 1;
        }
    }

    Ok(workbook)
}

/// Write the report workbook to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, or if the
/// workbook cannot be built or saved.
pub fn write_spreadsheet_file(
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

    let mut workbook = build_workbook(libraries, fields, hide_path)
        .context("Failed to build spreadsheet")?;
    workbook
        .save(path)
        .with_context(|| format!("Failed to write spreadsheet {}", path.display()))?;

    Ok(())
}
