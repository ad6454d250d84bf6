//! FILENAME: core/persistence/src/lib.rs
//! WorkHub Persistence Module
//!
//! Turns CSV and spreadsheet files into `ParsedTable`s, writes tables back
//! out as CSV or XLSX, and provides the key-value port used for state that
//! outlives a session.

mod csv_reader;
mod csv_writer;
mod error;
mod format;
mod header;
mod recent;
mod store;
mod xlsx_reader;
mod xlsx_writer;

pub use csv_reader::{coerce_token, parse_csv};
pub use csv_writer::export_csv;
pub use error::{PersistenceError, Result};
pub use format::TableFormat;
pub use header::{normalize_headers, EMPTY_HEADER_KEY};
pub use recent::{RecentEntry, RecentWork, DEFAULT_RECENT_LIMIT, RECENT_WORK_KEY};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use xlsx_reader::parse_spreadsheet;
pub use xlsx_writer::{save_xlsx, xlsx_bytes, EXPORT_SHEET_NAME};

use engine::{InferenceOptions, ParsedTable};
use std::fs;
use std::path::Path;

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Parses raw file content in the given format.
///
/// CSV bytes are decoded as UTF-8; invalid sequences are replaced rather
/// than rejected.
pub fn parse(
    bytes: &[u8],
    format: TableFormat,
    source_name: &str,
    options: &InferenceOptions,
) -> Result<ParsedTable> {
    match format {
        TableFormat::Csv => {
            let text = String::from_utf8_lossy(bytes);
            parse_csv(&text, source_name, options)
        }
        TableFormat::Spreadsheet => parse_spreadsheet(bytes, source_name, options),
    }
}

/// Parses content whose format is declared by the extension of `file_name`.
///
/// Fails with [`PersistenceError::UnsupportedFormat`] for anything other
/// than `csv`, `xlsx` or `xls`.
pub fn parse_named(file_name: &str, bytes: &[u8], options: &InferenceOptions) -> Result<ParsedTable> {
    let format = TableFormat::from_file_name(file_name)?;
    parse(bytes, format, file_name, options)
}

/// Reads and parses a file from disk. The table's `source_name` is the file name.
pub fn load_table(path: &Path, options: &InferenceOptions) -> Result<ParsedTable> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let format = TableFormat::from_file_name(&file_name)?;

    let bytes = fs::read(path)?;
    log::info!(target: "PARSE", "loading {} ({}, {} bytes)", path.display(), format, bytes.len());
    parse(&bytes, format, &file_name, options)
}

/// Writes `table` to `path`, choosing CSV or XLSX from the extension.
pub fn save_table(table: &ParsedTable, path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match TableFormat::from_extension(extension)? {
        TableFormat::Csv => {
            fs::write(path, export_csv(table)?)?;
            log::info!(target: "STORE", "saved {} rows to {}", table.row_count, path.display());
            Ok(())
        }
        TableFormat::Spreadsheet => save_xlsx(table, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{CellValue, ColumnType};
    use tempfile::tempdir;

    #[test]
    fn test_parse_named_dispatches_on_extension() {
        let table = parse_named("people.CSV", b"name,age\nAda,36\n", &InferenceOptions::default()).unwrap();
        assert_eq!(table.source_name, "people.CSV");
        assert_eq!(table.row_count, 1);

        let err = parse_named("notes.txt", b"a,b\n1,2\n", &InferenceOptions::default()).unwrap_err();
        assert!(matches!(err, PersistenceError::UnsupportedFormat { ref extension } if extension == "txt"));
    }

    #[test]
    fn test_xlsx_save_then_load() {
        let csv = "region,units,active,\nNorth,10,,x\nSouth,2.5,,\n";
        let table = parse_csv(csv, "in.csv", &InferenceOptions::default()).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        save_table(&table, &path).unwrap();

        let loaded = load_table(&path, &InferenceOptions::default()).unwrap();
        assert_eq!(loaded.source_name, "out.xlsx");
        assert_eq!(loaded.row_count, 2);

        let keys: Vec<&str> = loaded.column_keys().collect();
        assert_eq!(keys, vec!["region", "units", "active", "__EMPTY"]);
        assert_eq!(loaded.column("units").unwrap().column_type, ColumnType::Number);
        assert_eq!(loaded.rows[1].value("units"), &CellValue::Number(2.5));
        // cells left blank on write come back as empty strings
        assert_eq!(loaded.rows[0].value("active"), &CellValue::text(""));
        assert_eq!(loaded.rows[1].value("__EMPTY"), &CellValue::text(""));
    }

    #[test]
    fn test_xlsx_bytes_parse_in_memory() {
        let table = parse_csv("k,v\na,1\nb,2\n", "kv.csv", &InferenceOptions::default()).unwrap();
        let bytes = xlsx_bytes(&table).unwrap();

        let parsed = parse(&bytes, TableFormat::Spreadsheet, "kv.xlsx", &InferenceOptions::default()).unwrap();
        assert_eq!(parsed.numeric_values("v"), vec![1.0, 2.0]);
    }

    #[test]
    fn test_csv_save_then_load() {
        let table = parse_csv("a,b\n1,x\n", "in.csv", &InferenceOptions::default()).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("copy.csv");

        save_table(&table, &path).unwrap();
        let loaded = load_table(&path, &InferenceOptions::default()).unwrap();
        assert_eq!(loaded.rows, table.rows);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_table(&dir.path().join("absent.csv"), &InferenceOptions::default()).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let table = ParsedTable::empty("e");
        assert!(matches!(
            save_table(&table, &dir.path().join("out.json")),
            Err(PersistenceError::UnsupportedFormat { .. })
        ));
    }
}
