//! FILENAME: core/engine/src/table.rs
//! PURPOSE: The row/column model produced by one file load.
//! CONTEXT: A ParsedTable is built once per load and never mutated in place.
//! Re-deriving column types returns a new table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::column::Column;
use crate::inference::{infer_columns, InferenceOptions};

// ============================================================================
// ROW
// ============================================================================

/// A mapping from column key to cell value. Missing keys read as null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: FxHashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        self.values.insert(key.into(), value);
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.values.get(key)
    }

    /// The value at `key`, or null when the key is absent.
    pub fn value(&self, key: &str) -> &CellValue {
        static NULL: CellValue = CellValue::Null;
        self.values.get(key).unwrap_or(&NULL)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Row {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ============================================================================
// PARSED TABLE
// ============================================================================

/// In-memory result of parsing one CSV or spreadsheet file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub source_name: String,
    pub row_count: usize,
}

impl ParsedTable {
    /// Builds a table and keeps `row_count` in step with `rows`.
    pub fn new(source_name: impl Into<String>, columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        ParsedTable {
            columns,
            rows,
            source_name: source_name.into(),
            row_count,
        }
    }

    /// A table with no columns and no rows.
    pub fn empty(source_name: impl Into<String>) -> Self {
        Self::new(source_name, Vec::new(), Vec::new())
    }

    /// Builds a table from raw column keys, inferring every column type.
    pub fn from_rows(
        source_name: impl Into<String>,
        keys: Vec<String>,
        rows: Vec<Row>,
        options: &InferenceOptions,
    ) -> Self {
        let columns = infer_columns(keys, &rows, options);
        Self::new(source_name, columns, rows)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn column_keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    /// Every successfully coerced numeric value in the column, in row order.
    /// Non-numeric and missing values are dropped silently.
    pub fn numeric_values(&self, key: &str) -> Vec<f64> {
        extract_numeric_values(&self.rows, key)
    }

    /// Returns a copy of this table with column types re-derived from the rows.
    pub fn reinfer_types(&self, options: &InferenceOptions) -> ParsedTable {
        let keys = self.columns.iter().map(|c| c.key.clone()).collect();
        let mut columns = infer_columns(keys, &self.rows, options);
        for (column, previous) in columns.iter_mut().zip(&self.columns) {
            column.label = previous.label.clone();
        }
        ParsedTable::new(self.source_name.clone(), columns, self.rows.clone())
    }
}

/// Numeric extraction over bare rows.
pub fn extract_numeric_values(rows: &[Row], key: &str) -> Vec<f64> {
    rows.iter().filter_map(|row| row.value(key).as_number()).collect()
}
