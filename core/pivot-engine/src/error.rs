//! FILENAME: core/pivot-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PivotError {
    #[error("Unknown aggregate function: {0}")]
    UnknownAggregation(String),
}
