//! Report output: console table or CSV file

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::row::{COLUMNS, PaperRow};

/// Build a console table with one line per paper.
pub fn render_table(rows: &[PaperRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(COLUMNS.iter().map(|c| Cell::new(c).fg(Color::Cyan)));

    for row in rows {
        table.add_row(row.cells());
    }
    table
}

/// Write rows as CSV with a header line, even when `rows` is empty.
pub fn write_csv<W: Write>(rows: &[PaperRow], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(COLUMNS).context("Failed to write CSV header")?;
    for row in rows {
        csv.serialize(row)
            .with_context(|| format!("Failed to write CSV row for PMID {}", row.pmid))?;
    }
    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Print rows to stdout, or save them as CSV when `path` is given.
///
/// Nothing is printed or written for an empty result.
pub fn write_results(rows: &[PaperRow], path: Option<&Path>) -> Result<()> {
    if rows.is_empty() {
        log::info!("No results to write.");
        return Ok(());
    }

    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(rows, io::BufWriter::new(file))
                .with_context(|| format!("Error saving CSV to {}", path.display()))?;
            log::info!("Results saved to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", render_table(rows)).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
