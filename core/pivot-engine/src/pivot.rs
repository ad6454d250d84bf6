//! FILENAME: core/pivot-engine/src/pivot.rs
//! Pivot Engine - Two-field cross tabulation.
//!
//! Rows are bucketed by (row label, column label), each bucket is aggregated,
//! and totals are formed by SUMMING the aggregated cells. For non-additive
//! functions (average, min, max) the totals are therefore sums of per-cell
//! results, not a re-aggregation of the raw values.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use engine::{ParsedTable, Row};

use crate::aggregate::aggregate;
use crate::definition::{AggregateFunction, PivotDefinition};

// ============================================================================
// RESULT
// ============================================================================

/// Computed pivot view. Labels are sorted lexicographically; `cell_values`
/// is indexed `[row][column]` in label order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotResult {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub cell_values: Vec<Vec<f64>>,
    pub row_totals: Vec<f64>,
    pub column_totals: Vec<f64>,
    pub grand_total: f64,
}

impl PivotResult {
    fn row_index(&self, label: &str) -> Option<usize> {
        self.row_labels.iter().position(|l| l == label)
    }

    fn column_index(&self, label: &str) -> Option<usize> {
        self.column_labels.iter().position(|l| l == label)
    }

    /// The aggregated value at (row label, column label).
    pub fn cell(&self, row_label: &str, column_label: &str) -> Option<f64> {
        let r = self.row_index(row_label)?;
        let c = self.column_index(column_label)?;
        self.cell_values.get(r)?.get(c).copied()
    }

    pub fn row_total(&self, row_label: &str) -> Option<f64> {
        self.row_index(row_label).and_then(|r| self.row_totals.get(r).copied())
    }

    pub fn column_total(&self, column_label: &str) -> Option<f64> {
        self.column_index(column_label)
            .and_then(|c| self.column_totals.get(c).copied())
    }

    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() && self.column_labels.is_empty()
    }
}

// ============================================================================
// CALCULATION
// ============================================================================

/// Builds a pivot over `rows`.
///
/// Every (row label, column label) pair of the cross product gets a cell,
/// including pairs no row falls into (those aggregate an empty bucket to 0).
pub fn create_pivot_table(
    rows: &[Row],
    row_field: &str,
    column_field: &str,
    value_field: &str,
    function: AggregateFunction,
) -> PivotResult {
    let mut buckets: FxHashMap<(String, String), Vec<f64>> = FxHashMap::default();
    let mut row_set = BTreeSet::new();
    let mut column_set = BTreeSet::new();

    for row in rows {
        let row_label = row.value(row_field).label();
        let column_label = row.value(column_field).label();
        row_set.insert(row_label.clone());
        column_set.insert(column_label.clone());

        let bucket = buckets.entry((row_label, column_label)).or_default();
        if let Some(n) = row.value(value_field).as_number() {
            bucket.push(n);
        }
    }

    let row_labels: Vec<String> = row_set.into_iter().collect();
    let column_labels: Vec<String> = column_set.into_iter().collect();

    let cell_values: Vec<Vec<f64>> = row_labels
        .iter()
        .map(|r| {
            column_labels
                .iter()
                .map(|c| {
                    let values = buckets
                        .get(&(r.clone(), c.clone()))
                        .map(Vec::as_slice)
                        .unwrap_or(&[]);
                    aggregate(values, function)
                })
                .collect()
        })
        .collect();

    let row_totals: Vec<f64> = cell_values.iter().map(|cells| cells.iter().sum()).collect();
    let column_totals: Vec<f64> = (0..column_labels.len())
        .map(|c| cell_values.iter().map(|cells| cells[c]).sum())
        .collect();
    let grand_total: f64 = row_totals.iter().sum();

    log::info!(
        target: "PIVOT",
        "created pivot rows={} cols={} fn={} grand_total={}",
        row_labels.len(), column_labels.len(), function, grand_total
    );

    PivotResult {
        row_labels,
        column_labels,
        cell_values,
        row_totals,
        column_totals,
        grand_total,
    }
}

/// Convenience wrapper that takes its configuration from a definition.
pub fn calculate_pivot(table: &ParsedTable, definition: &PivotDefinition) -> PivotResult {
    create_pivot_table(
        &table.rows,
        &definition.row_field,
        &definition.column_field,
        &definition.value_field,
        definition.aggregation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_rows() -> Vec<Row> {
        vec![
            Row::new().with("region", "North").with("product", "Apples").with("sales", 100.0),
            Row::new().with("region", "North").with("product", "Oranges").with("sales", 150.0),
            Row::new().with("region", "South").with("product", "Apples").with("sales", 200.0),
            Row::new().with("region", "South").with("product", "Apples").with("sales", 300.0),
            Row::new().with("region", "East").with("product", "Pears").with("sales", "n/a"),
        ]
    }

    #[test]
    fn test_basic_pivot_calculation() {
        let pivot = create_pivot_table(&create_test_rows(), "region", "product", "sales", AggregateFunction::Sum);

        assert_eq!(pivot.row_labels, vec!["East", "North", "South"]);
        assert_eq!(pivot.column_labels, vec!["Apples", "Oranges", "Pears"]);
        assert_eq!(pivot.cell("North", "Apples"), Some(100.0));
        assert_eq!(pivot.cell("South", "Apples"), Some(500.0));
        assert_eq!(pivot.row_total("North"), Some(250.0));
        assert_eq!(pivot.column_total("Apples"), Some(600.0));
        assert_eq!(pivot.grand_total, 750.0);
    }

    #[test]
    fn test_missing_pairs_are_zero() {
        let pivot = create_pivot_table(&create_test_rows(), "region", "product", "sales", AggregateFunction::Count);

        assert_eq!(pivot.cell("South", "Oranges"), Some(0.0));
        // East/Pears exists but its only value is not numeric
        assert_eq!(pivot.cell("East", "Pears"), Some(0.0));
        assert_eq!(pivot.cell("South", "Apples"), Some(2.0));
        assert_eq!(pivot.cell("West", "Apples"), None);
    }

    #[test]
    fn test_totals_agree_both_ways() {
        for f in AggregateFunction::ALL {
            let pivot = create_pivot_table(&create_test_rows(), "region", "product", "sales", f);
            let by_rows: f64 = pivot.row_totals.iter().sum();
            let by_cols: f64 = pivot.column_totals.iter().sum();
            assert!((pivot.grand_total - by_rows).abs() < 1e-9, "{f}");
            assert!((pivot.grand_total - by_cols).abs() < 1e-9, "{f}");
        }
    }

    #[test]
    fn test_average_totals_sum_cell_averages() {
        let rows = vec![
            Row::new().with("r", "A").with("c", "X").with("v", 10.0),
            Row::new().with("r", "A").with("c", "X").with("v", 20.0),
            Row::new().with("r", "A").with("c", "Y").with("v", 100.0),
        ];
        let pivot = create_pivot_table(&rows, "r", "c", "v", AggregateFunction::Average);

        assert_eq!(pivot.cell("A", "X"), Some(15.0));
        assert_eq!(pivot.cell("A", "Y"), Some(100.0));
        // 15 + 100, not the overall average of 43.33
        assert_eq!(pivot.row_total("A"), Some(115.0));
        assert_eq!(pivot.grand_total, 115.0);
    }

    #[test]
    fn test_labels_sort_as_strings() {
        let rows = vec![
            Row::new().with("r", 10.0).with("c", "x").with("v", 1.0),
            Row::new().with("r", 9.0).with("c", "x").with("v", 1.0),
            Row::new().with("r", 100.0).with("c", "x").with("v", 1.0),
        ];
        let pivot = create_pivot_table(&rows, "r", "c", "v", AggregateFunction::Sum);
        assert_eq!(pivot.row_labels, vec!["10", "100", "9"]);
    }

    #[test]
    fn test_empty_rows() {
        let pivot = create_pivot_table(&[], "r", "c", "v", AggregateFunction::Sum);
        assert!(pivot.is_empty());
        assert_eq!(pivot.grand_total, 0.0);
        assert!(pivot.cell_values.is_empty());
    }

    #[test]
    fn test_calculate_from_definition() {
        let table = ParsedTable::new("t", vec![], create_test_rows());
        let def = PivotDefinition::new("product", "region", "sales", AggregateFunction::Max);
        let pivot = calculate_pivot(&table, &def);

        assert_eq!(pivot.row_labels, vec!["Apples", "Oranges", "Pears"]);
        assert_eq!(pivot.cell("Apples", "South"), Some(300.0));
    }
}
