//! FILENAME: core/engine/src/column.rs
//! PURPOSE: Column descriptors for a parsed table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a column, derived from its contents.
///
/// The declaration order is also the tie-break order used by inference:
/// when two buckets have the same count, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Boolean,
    Date,
    #[default]
    Unknown,
}

impl ColumnType {
    /// All types in tie-break order.
    pub const ALL: [ColumnType; 5] = [
        ColumnType::String,
        ColumnType::Number,
        ColumnType::Boolean,
        ColumnType::Date,
        ColumnType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Unknown => "unknown",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ColumnType::String => 0,
            ColumnType::Number => 1,
            ColumnType::Boolean => 2,
            ColumnType::Date => 3,
            ColumnType::Unknown => 4,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique within the owning table.
    pub key: String,
    /// Display name.
    pub label: String,
    /// Best-effort classification, never authoritative.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    /// A column whose label equals its key and whose type is not yet known.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Column {
            label: key.clone(),
            key,
            column_type: ColumnType::Unknown,
        }
    }

    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }
}
