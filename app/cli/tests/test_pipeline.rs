//! FILENAME: tests/test_pipeline.rs
//! Integration tests for the load -> infer -> aggregate/pivot commands.

mod common;

use common::TestHarness;
use engine::ColumnType;
use persistence::TableFormat;
use pivot_engine::{AggregateFunction, PivotDefinition};

// ============================================================================
// INSPECT / STATS
// ============================================================================

#[test]
fn test_inspect_reports_inferred_types() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();

    let summary = harness.workspace.inspect(&path).unwrap();
    assert_eq!(summary.source_name, "sales.csv");
    assert_eq!(summary.row_count, 5);

    let types: Vec<(&str, ColumnType)> = summary
        .columns
        .iter()
        .map(|c| (c.key.as_str(), c.column_type))
        .collect();
    assert_eq!(
        types,
        vec![
            ("region", ColumnType::String),
            ("quarter", ColumnType::String),
            ("amount", ColumnType::Number),
            ("active", ColumnType::String),
            ("joined", ColumnType::Date),
        ]
    );
}

#[test]
fn test_stats_skip_non_numeric_values() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();

    let stats = harness.workspace.stats(&path, "amount").unwrap();
    assert_eq!(stats.count, 4);
    assert_eq!(stats.sum, 350.0);
    assert_eq!(stats.mean, 87.5);
    assert_eq!(stats.min, 20.0);
    assert_eq!(stats.max, 150.0);
    assert_eq!(stats.median, 90.0);
}

#[test]
fn test_stats_on_text_column_is_zeroed() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();

    let stats = harness.workspace.stats(&path, "region").unwrap();
    assert_eq!(stats.count, 0);
    assert_eq!(stats.sum, 0.0);
    assert_eq!(stats.standard_deviation, 0.0);
}

// ============================================================================
// GROUP / PIVOT
// ============================================================================

#[test]
fn test_group_average_by_region() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();

    let report = harness
        .workspace
        .group(&path, "region", "amount", AggregateFunction::Average)
        .unwrap();

    let groups: Vec<(&str, f64)> = report.groups.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(groups, vec![("East", 0.0), ("North", 125.0), ("South", 50.0)]);
}

#[test]
fn test_pivot_sum_with_totals() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();
    let definition = PivotDefinition::new("region", "quarter", "amount", AggregateFunction::Sum);

    let pivot = harness.workspace.pivot(&path, &definition).unwrap();
    assert_eq!(pivot.row_labels, vec!["East", "North", "South"]);
    assert_eq!(pivot.column_labels, vec!["Q1", "Q2"]);
    assert_eq!(pivot.cell("North", "Q2"), Some(150.0));
    assert_eq!(pivot.cell("South", "Q1"), Some(100.0));
    assert_eq!(pivot.cell("East", "Q1"), Some(0.0));
    assert_eq!(pivot.row_total("North"), Some(250.0));
    assert_eq!(pivot.column_total("Q1"), Some(200.0));
    assert_eq!(pivot.grand_total, 350.0);
}

#[test]
fn test_pivot_rejects_unknown_field() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();
    let definition = PivotDefinition::new("region", "month", "amount", AggregateFunction::Sum);

    let err = harness.workspace.pivot(&path, &definition).unwrap_err();
    assert!(err.to_string().contains("month"));
}

// ============================================================================
// EXPORT / RECENT
// ============================================================================

#[test]
fn test_export_to_xlsx_and_reload() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();
    let out = harness.path("sales.xlsx");

    let report = harness.workspace.export(&path, &out).unwrap();
    assert_eq!(report.row_count, 5);
    assert!(out.exists());

    let summary = harness.workspace.inspect(&out).unwrap();
    assert_eq!(summary.row_count, 5);
    let keys: Vec<&str> = summary.columns.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["region", "quarter", "amount", "active", "joined"]);

    let stats = harness.workspace.stats(&out, "amount").unwrap();
    assert_eq!(stats.sum, 350.0);
}

#[test]
fn test_unsupported_extension() {
    let mut harness = TestHarness::new();
    let path = harness.write_file("notes.txt", "a,b\n1,2\n");

    let err = harness.workspace.inspect(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Unsupported file format: \"txt\""));
    assert!(harness.workspace.recent().unwrap().is_empty());
}

#[test]
fn test_recent_work_tracks_loads() {
    let mut harness = TestHarness::new();
    let sales = harness.sales_csv();
    let other = harness.write_file("other.csv", "k,v\na,1\n");

    harness.workspace.inspect(&sales).unwrap();
    harness.workspace.inspect(&other).unwrap();
    harness.workspace.inspect(&sales).unwrap();

    let recent = harness.workspace.recent().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].name, sales.display().to_string());
    assert_eq!(recent[0].format, TableFormat::Csv);
    assert_eq!(recent[0].row_count, 5);
    assert_eq!(recent[1].row_count, 1);

    harness.workspace.clear_recent().unwrap();
    assert!(harness.workspace.recent().unwrap().is_empty());
}
