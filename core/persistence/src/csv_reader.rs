//! FILENAME: core/persistence/src/csv_reader.rs
//! PURPOSE: Decodes CSV text into a ParsedTable.
//! CONTEXT: The first record is the header. Numeric-looking tokens become
//! numbers, empty fields become null, everything else stays text.

use csv::ReaderBuilder;
use engine::{CellValue, InferenceOptions, ParsedTable, Row};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::header::normalize_headers;

/// A plain decimal or scientific-notation number, optionally signed and padded.
/// Words such as `inf` or `NaN` stay text.
static NUMERIC_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?\s*$").expect("hardcoded regex pattern")
});

/// Converts one raw CSV field into a cell value.
pub fn coerce_token(token: &str) -> CellValue {
    if token.is_empty() {
        return CellValue::Null;
    }
    if NUMERIC_TOKEN.is_match(token) {
        if let Ok(n) = token.trim().parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
    }
    CellValue::Text(token.to_string())
}

/// Parses CSV `text`. Blank lines are skipped, but a line of bare separators
/// is a row of nulls. A header with no data rows yields an empty table.
pub fn parse_csv(text: &str, source_name: &str, options: &InferenceOptions) -> Result<ParsedTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let keys = normalize_headers(reader.headers()?.iter());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = keys
            .iter()
            .zip(record.iter())
            .map(|(key, field)| (key.as_str(), coerce_token(field)))
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        log::info!(target: "PARSE", "{}: no data rows", source_name);
        return Ok(ParsedTable::empty(source_name));
    }

    log::info!(
        target: "PARSE",
        "{}: parsed csv columns={} rows={}",
        source_name, keys.len(), rows.len()
    );
    Ok(ParsedTable::from_rows(source_name, keys, rows, options))
}
