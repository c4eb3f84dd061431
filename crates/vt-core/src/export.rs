//! CSV export

use crate::error::{CoreError, CoreResult};
use crate::table::Table;

/// Serialize a table to UTF-8 CSV bytes.
///
/// Writes a header row followed by one line per row, quoting fields only when
/// needed. Missing cells become empty fields. A table with no rows produces
/// an empty byte sequence rather than a header-only file.
pub fn to_csv_bytes(table: &Table) -> CoreResult<Vec<u8>> {
    if table.is_empty() {
        log::warn!("Exporting a table with no rows; output is empty");
        return Ok(Vec::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.cells().map(|(_, cell)| cell.render()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("failed to flush CSV output: {}", e)))?;

    log::debug!("Serialized CSV output: {} bytes", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
