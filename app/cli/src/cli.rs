//! FILENAME: app/cli/src/cli.rs
//! Command line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use pivot_engine::AggregateFunction;

#[derive(Debug, Parser)]
#[command(
    name = "workhub",
    version,
    about = "WorkHub data toolkit - inspect, summarize and pivot CSV / Excel files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: ./workhub.json when present).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Explicit log level (off, error, warn, info, debug, trace).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Copy log lines to a file.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Rows sampled per column when inferring types.
    #[arg(long = "sample-rows", value_name = "N", global = true)]
    pub sample_rows: Option<usize>,

    /// Undo entries kept by the interactive session.
    #[arg(long = "history-limit", value_name = "N", global = true)]
    pub history_limit: Option<usize>,

    /// Key-value store backing the recent-work list.
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show columns, inferred types and row count.
    Inspect {
        file: PathBuf,
    },

    /// Descriptive statistics for one column.
    Stats {
        file: PathBuf,
        column: String,
    },

    /// Aggregate one column grouped by another.
    Group {
        file: PathBuf,
        by: String,
        value: String,
        /// sum, count, average, min or max.
        #[arg(default_value = "sum")]
        function: AggregateFunction,
    },

    /// Two-field pivot with row and column totals.
    Pivot {
        file: PathBuf,
        row: String,
        column: String,
        value: String,
        #[arg(default_value = "sum")]
        function: AggregateFunction,
    },

    /// Convert a table to CSV or XLSX (chosen by the output extension).
    Export {
        file: PathBuf,
        output: PathBuf,
    },

    /// List recently loaded files.
    Recent {
        /// Forget the whole list.
        #[arg(long)]
        clear: bool,
    },

    /// Interactive session with undo/redo.
    Shell,
}
