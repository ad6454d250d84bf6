//! FILENAME: core/persistence/src/xlsx_reader.rs

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use engine::{CellValue, InferenceOptions, ParsedTable, Row};

use crate::error::Result;
use crate::header::normalize_headers;

/// Parses the first sheet of an `.xlsx` / `.xls` workbook held in memory.
///
/// The first non-empty row supplies the column keys. Every data row carries
/// a value for every column, with missing cells read as the empty string.
/// Rows whose cells are all empty are skipped.
pub fn parse_spreadsheet(bytes: &[u8], source_name: &str, options: &InferenceOptions) -> Result<ParsedTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => {
            log::warn!(target: "PARSE", "{}: workbook contains no sheets", source_name);
            return Ok(ParsedTable::empty(source_name));
        }
    };

    let mut records = range
        .rows()
        .filter(|cells| !cells.iter().all(|c| matches!(c, Data::Empty)));

    let Some(header) = records.next() else {
        return Ok(ParsedTable::empty(source_name));
    };
    let keys = normalize_headers(header.iter().map(header_text));

    let rows: Vec<Row> = records.map(|cells| record_to_row(&keys, cells)).collect();

    if rows.is_empty() {
        log::info!(target: "PARSE", "{}: no data rows", source_name);
        return Ok(ParsedTable::empty(source_name));
    }

    log::info!(
        target: "PARSE",
        "{}: parsed sheet columns={} rows={}",
        source_name, keys.len(), rows.len()
    );
    Ok(ParsedTable::from_rows(source_name, keys, rows, options))
}

fn record_to_row(keys: &[String], cells: &[Data]) -> Row {
    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            let value = cells.get(i).map(cell_value).unwrap_or_else(|| CellValue::text(""));
            (key.as_str(), value)
        })
        .collect()
}

/// Converts one worksheet cell. Empty cells become the empty string.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::text(""),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => cell_value(other).label(),
    }
}
