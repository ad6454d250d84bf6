//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::PersistenceError;
use engine::{CellValue, ParsedTable};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Name of the single worksheet written by the exporter.
pub const EXPORT_SHEET_NAME: &str = "Data";

/// Writes `table` to an `.xlsx` file: a bold header row of column labels
/// followed by one row per record.
pub fn save_xlsx(table: &ParsedTable, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = build_workbook(table)?;
    xlsx.save(path)?;
    log::info!(target: "STORE", "saved {} rows to {}", table.row_count, path.display());
    Ok(())
}

/// Same layout as [`save_xlsx`], returned as bytes.
pub fn xlsx_bytes(table: &ParsedTable) -> Result<Vec<u8>, PersistenceError> {
    let mut xlsx = build_workbook(table)?;
    Ok(xlsx.save_to_buffer()?)
}

fn build_workbook(table: &ParsedTable) -> Result<XlsxWorkbook, PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, column) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, &column.label, &header_format)?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let excel_row = u32::try_from(i + 1)
            .map_err(|_| PersistenceError::InvalidFormat(format!("row {} out of range", i + 1)))?;
        for (col, column) in table.columns.iter().enumerate() {
            write_cell(worksheet, excel_row, column_index(col)?, row.value(&column.key))?;
        }
    }

    Ok(xlsx)
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<(), PersistenceError> {
    match value {
        CellValue::Null => {}
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Text(s) if s.is_empty() => {}
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

fn column_index(col: usize) -> Result<u16, PersistenceError> {
    u16::try_from(col).map_err(|_| PersistenceError::InvalidFormat(format!("column {} out of range", col)))
}
