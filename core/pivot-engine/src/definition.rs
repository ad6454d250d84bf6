//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Table Definition - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE an aggregation:
//! which function to apply and which fields feed the pivot. They are plain
//! values, cheap to clone and safe to keep inside an undo history.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PivotError;

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunction {
    #[default]
    Sum,
    Count,
    Average,
    Min,
    Max,
}

impl AggregateFunction {
    pub const ALL: [AggregateFunction; 5] = [
        AggregateFunction::Sum,
        AggregateFunction::Count,
        AggregateFunction::Average,
        AggregateFunction::Min,
        AggregateFunction::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Sum => "sum",
            AggregateFunction::Count => "count",
            AggregateFunction::Average => "average",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateFunction {
    type Err = PivotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        AggregateFunction::ALL
            .into_iter()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| PivotError::UnknownAggregation(s.to_string()))
    }
}

// ============================================================================
// PIVOT DEFINITION
// ============================================================================

/// The four choices that fully determine a pivot result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotDefinition {
    /// Field whose distinct values become row labels.
    pub row_field: String,
    /// Field whose distinct values become column labels.
    pub column_field: String,
    /// Field whose numeric values are aggregated.
    pub value_field: String,
    pub aggregation: AggregateFunction,
}

impl PivotDefinition {
    pub fn new(
        row_field: impl Into<String>,
        column_field: impl Into<String>,
        value_field: impl Into<String>,
        aggregation: AggregateFunction,
    ) -> Self {
        PivotDefinition {
            row_field: row_field.into(),
            column_field: column_field.into(),
            value_field: value_field.into(),
            aggregation,
        }
    }
}
