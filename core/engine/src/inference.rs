//! FILENAME: core/engine/src/inference.rs
//! PURPOSE: Best-effort semantic typing of table columns.
//! CONTEXT: Each column is classified by majority vote over a sample of its
//! leading values. The result is advisory and can be re-derived at any time.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cell::CellValue;
use crate::column::{Column, ColumnType};
use crate::table::Row;

/// Number of leading rows inspected per column by default.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Date shapes recognized in text cells:
/// `YYYY-MM-DD`, `YYYY/MM/DD`, `DD-MM-YYYY`, `DD/MM/YYYY` and an ISO-8601 timestamp prefix.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d{4}-\d{2}-\d{2}$",
        r"^\d{4}/\d{2}/\d{2}$",
        r"^\d{2}-\d{2}-\d{4}$",
        r"^\d{2}/\d{2}/\d{4}$",
        r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("hardcoded regex pattern"))
    .collect()
});

/// Tuning knobs for inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceOptions {
    /// How many leading rows are sampled per column.
    pub sample_size: usize,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        InferenceOptions {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// True when `text` matches one of the recognized date shapes.
pub fn looks_like_date(text: &str) -> bool {
    DATE_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Classifies one value. Blank values return `None` and are not counted.
///
/// Precedence: native number, native boolean, date-shaped text,
/// numeric text, then plain text.
pub fn classify_value(value: &CellValue) -> Option<ColumnType> {
    if value.is_blank() {
        return None;
    }
    let kind = match value {
        CellValue::Number(_) => ColumnType::Number,
        CellValue::Boolean(_) => ColumnType::Boolean,
        CellValue::Text(s) if looks_like_date(s) => ColumnType::Date,
        CellValue::Text(s) if is_numeric_text(s) => ColumnType::Number,
        CellValue::Text(_) => ColumnType::String,
        CellValue::Null => return None,
    };
    Some(kind)
}

fn is_numeric_text(s: &str) -> bool {
    s.trim().parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Infers the type of column `key` from the first `sample_size` rows.
///
/// The bucket with the highest count wins. Ties go to the bucket declared
/// first in [`ColumnType::ALL`] (string, number, boolean, date, unknown),
/// so an even split between text and numbers infers `string`.
/// A column with no non-blank samples is `unknown`.
pub fn infer_column_type(rows: &[Row], key: &str, options: &InferenceOptions) -> ColumnType {
    let mut counts = [0usize; 5];
    for row in rows.iter().take(options.sample_size) {
        if let Some(kind) = classify_value(row.value(key)) {
            counts[kind.index()] += 1;
        }
    }

    let mut best = ColumnType::Unknown;
    let mut best_count = 0;
    for kind in ColumnType::ALL {
        let count = counts[kind.index()];
        if count > best_count {
            best = kind;
            best_count = count;
        }
    }

    log::trace!(target: "INFER", "column={} counts={:?} -> {}", key, counts, best);
    best
}

/// Builds typed column descriptors for `keys`, in order.
pub fn infer_columns(keys: Vec<String>, rows: &[Row], options: &InferenceOptions) -> Vec<Column> {
    keys.into_iter()
        .map(|key| {
            let column_type = infer_column_type(rows, &key, options);
            Column::new(key).with_type(column_type)
        })
        .collect()
}
