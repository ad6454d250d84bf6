//! FILENAME: core/persistence/src/csv_writer.rs

use csv::WriterBuilder;
use engine::{CellValue, ParsedTable};

use crate::error::{PersistenceError, Result};

/// Serializes `table` as CSV: one header record of column labels, then
/// one record per row in column order. Null cells are written empty.
pub fn export_csv(table: &ParsedTable) -> Result<String> {
    if table.columns.is_empty() {
        return Ok(String::new());
    }
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(table.columns.iter().map(|c| c.label.as_str()))?;
    for row in &table.rows {
        writer.write_record(table.columns.iter().map(|c| field_text(row.value(&c.key))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PersistenceError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| PersistenceError::InvalidFormat(e.to_string()))
}

fn field_text(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        other => other.label(),
    }
}
