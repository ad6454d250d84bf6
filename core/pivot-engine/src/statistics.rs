//! FILENAME: core/pivot-engine/src/statistics.rs
//! PURPOSE: Descriptive statistics for one numeric column.
//! CONTEXT: Results are recomputed on every request; nothing is cached.
//! Undefined statistics (empty input, spread of a single point) are 0.

use serde::{Deserialize, Serialize};

use engine::ParsedTable;

/// Read-only summary of one column's numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStatistics {
    pub column_key: String,
    pub column_label: String,
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub standard_deviation: f64,
    pub median: f64,
    /// Sample variance (n - 1 denominator).
    pub variance: f64,
}

impl ColumnStatistics {
    /// The all-zero result used for empty input.
    pub fn zeroed(key: impl Into<String>, label: impl Into<String>) -> Self {
        ColumnStatistics {
            column_key: key.into(),
            column_label: label.into(),
            count: 0,
            sum: 0.0,
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            standard_deviation: 0.0,
            median: 0.0,
            variance: 0.0,
        }
    }
}

/// Computes the summary of `values`.
pub fn compute_statistics(values: &[f64], key: &str, label: &str) -> ColumnStatistics {
    if values.is_empty() {
        return ColumnStatistics::zeroed(key, label);
    }

    let count = values.len();
    let n = count as f64;
    let sum: f64 = values.iter().sum();
    let mean = sum / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let min = sorted[0];
    let max = sorted[count - 1];
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    let variance = if count > 1 {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };

    ColumnStatistics {
        column_key: key.to_string(),
        column_label: label.to_string(),
        count,
        sum,
        mean,
        min,
        max,
        standard_deviation: variance.sqrt(),
        median,
        variance,
    }
}

/// Statistics for column `key` of `table`, or `None` if the column does not exist.
pub fn column_statistics(table: &ParsedTable, key: &str) -> Option<ColumnStatistics> {
    let column = table.column(key)?;
    let values = table.numeric_values(key);
    log::debug!(
        target: "STATS",
        "column={} numeric={} of rows={}",
        key, values.len(), table.row_count
    );
    Some(compute_statistics(&values, &column.key, &column.label))
}
