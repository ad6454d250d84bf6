//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the scalar value held by one cell of a parsed table.
//! CONTEXT: Every row value is one of four closed variants so that numeric
//! coercion in statistics and pivots is an exhaustive match, not a guess.

use serde::{Deserialize, Serialize};

/// The raw value found at one (row, column) position of a source file.
///
/// Serialized untagged, so JSON output shows plain scalars
/// (`12.5`, `"North"`, `true`, `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// True for null and for the empty string.
    /// Blank values are skipped by type inference.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) | CellValue::Boolean(_) => false,
        }
    }

    /// Best-effort numeric coercion used by aggregation.
    ///
    /// Numbers pass through, text is parsed as a float after trimming,
    /// everything else (and any non-finite result) yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Null | CellValue::Boolean(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    /// The string used when this value acts as a grouping label.
    pub fn label(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => format_number_label(*n),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// Integral values print without a fractional part ("3", not "3.0").
/// Negative zero prints as "0".
fn format_number_label(n: f64) -> String {
    let n = if n == 0.0 { 0.0 } else { n };
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}
