//! Plain-text table for terminal output
//!
//! Columns mirror the admin accounts table: ID Number, Name, Type.

use crate::types::{Account, ClientError};
use std::io::Write;

const HEADERS: [&str; 3] = ["ID Number", "Name", "Type"];

/// Render `accounts` as an aligned table, or `empty_message` when there are none
pub fn render_table(
    accounts: &[&Account],
    empty_message: &str,
    output: &mut dyn Write,
) -> Result<(), ClientError> {
    if accounts.is_empty() {
        writeln!(output, "{}", empty_message)?;
        return Ok(());
    }

    let rows: Vec<[&str; 3]> = accounts
        .iter()
        .map(|a| [a.id_number.as_str(), a.name.as_str(), a.kind.label()])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(output, &HEADERS, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(output, "{}", rule.join("  "))?;
    for row in &rows {
        write_row(output, row, &widths)?;
    }

    Ok(())
}

fn write_row(
    output: &mut dyn Write,
    cells: &[&str; 3],
    widths: &[usize; 3],
) -> Result<(), ClientError> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    writeln!(output, "{}", padded.join("  ").trim_end())?;
    Ok(())
}
