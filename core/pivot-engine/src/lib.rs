//! FILENAME: core/pivot-engine/src/lib.rs
//! Aggregation subsystem for WorkHub.
//!
//! This crate holds every computation that summarizes a parsed table. It
//! depends on `engine` only for the shared table model (Row, ParsedTable).
//!
//! Layers:
//! - `definition`: Serializable configuration (which fields, which function)
//! - `aggregate`: Scalar folds and single-field grouping
//! - `statistics`: Descriptive statistics for one column
//! - `pivot`: Two-field pivot calculation

pub mod aggregate;
pub mod definition;
pub mod error;
pub mod pivot;
pub mod statistics;

pub use aggregate::{aggregate, group_and_aggregate};
pub use definition::{AggregateFunction, PivotDefinition};
pub use error::PivotError;
pub use pivot::{calculate_pivot, create_pivot_table, PivotResult};
pub use statistics::{column_statistics, compute_statistics, ColumnStatistics};
