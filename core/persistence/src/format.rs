//! FILENAME: core/persistence/src/format.rs
//! PURPOSE: Maps file extensions onto the two supported input formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{PersistenceError, Result};

/// Input formats the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Comma-separated text with a header row.
    Csv,
    /// An Excel workbook (`.xlsx` or legacy `.xls`); only the first sheet is read.
    Spreadsheet,
}

impl TableFormat {
    /// Recognized extensions: `csv`, `xlsx`, `xls` (case-insensitive, with or without the dot).
    pub fn from_extension(extension: &str) -> Result<Self> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "xlsx" | "xls" => Ok(TableFormat::Spreadsheet),
            _ => Err(PersistenceError::UnsupportedFormat { extension: ext }),
        }
    }

    /// Picks the format from the extension of a file name or path.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Csv => f.write_str("csv"),
            TableFormat::Spreadsheet => f.write_str("spreadsheet"),
        }
    }
}
