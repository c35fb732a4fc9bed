//! CSV report writers
//!
//! Serialize the two export tables to disk. The tables arrive already
//! formatted (dates and `HH:MM` cells); this module only handles the CSV
//! encoding and file I/O.

use std::path::Path;

use caltally_domain::{CalTallyError, DailyCategoryMatrix, Result, UncategorizedReport};
use csv::WriterBuilder;
use tracing::info;

/// Write the daily date × category matrix.
///
/// # Errors
/// Returns `CalTallyError::Io` when the file cannot be created or written.
pub fn write_matrix_csv(path: &Path, matrix: &DailyCategoryMatrix) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|e| CalTallyError::Io(format!("Failed to create {}: {e}", path.display())))?;

    write_table(&mut writer, matrix.header(), matrix.to_rows())
        .map_err(|e| CalTallyError::Io(format!("Failed to write {}: {e}", path.display())))?;

    info!(path = %path.display(), rows = matrix.rows.len(), "wrote daily summary");
    Ok(())
}

/// Write the uncategorized-events list.
///
/// # Errors
/// Returns `CalTallyError::Io` when the file cannot be created or written.
pub fn write_uncategorized_csv(path: &Path, report: &UncategorizedReport) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|e| CalTallyError::Io(format!("Failed to create {}: {e}", path.display())))?;

    write_table(&mut writer, UncategorizedReport::header(), report.to_rows())
        .map_err(|e| CalTallyError::Io(format!("Failed to write {}: {e}", path.display())))?;

    info!(path = %path.display(), rows = report.rows.len(), "wrote uncategorized report");
    Ok(())
}

fn write_table<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
) -> std::result::Result<(), csv::Error> {
    writer.write_record(&header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
