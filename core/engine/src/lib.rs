//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the tabular data engine.
//! CONTEXT: Re-exports the table model, column type inference and the
//! generic undo/redo history for use by other crates.

pub mod cell;
pub mod column;
pub mod inference;
pub mod table;
pub mod undo;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use column::{Column, ColumnType};
pub use inference::{
    classify_value, infer_column_type, infer_columns, looks_like_date, InferenceOptions,
    DEFAULT_SAMPLE_SIZE,
};
pub use table::{extract_numeric_values, ParsedTable, Row};
pub use undo::{
    HistoryOptions, HistoryPhase, HistorySnapshot, UndoHistory, DEFAULT_MAX_HISTORY_SIZE,
};
