//! Console table renderer.

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};

use crate::clientlib::{ClientLibraries, ClientLibrary};

use super::header_row;

/// Render the libraries as a console table.
///
/// Sizes are shown in kilobytes with two decimals. Multi-valued fields keep
/// their line breaks, so each value sits on its own line inside the cell.
#[must_use]
pub fn render_table(libraries: &ClientLibraries, fields: &[String], hide_path: bool) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(header_row(fields, hide_path, "Compressed Size"));

    for library in libraries {
        table.add_row(row(library, fields, hide_path));
    }

    table.to_string()
}

fn row(library: &ClientLibrary, fields: &[String], hide_path: bool) -> Vec<String> {
    let mut cells = vec![library.name.clone()];
    if !hide_path {
        cells.push(library.path.clone());
    }
    cells.push(format!("{:.2} KB", library.size_kb()));
    cells.extend(
        fields
            .iter()
            .map(|field| library.field_display(field).unwrap_or_default().to_string()),
    );
    cells
}
