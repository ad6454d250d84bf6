//! FILENAME: tests/test_commands.rs
//! Integration tests for argument handling and one-shot command output.

mod common;

use clap::Parser;
use common::TestHarness;
use workhub::{apply_overrides, execute, AppConfig, Cli};

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("workhub").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_flags_override_file_settings() {
    let file_config = AppConfig {
        history_limit: 7,
        sample_rows: 20,
        ..AppConfig::default()
    };
    let args = cli(&["--sample-rows", "3", "--store", "s.json", "-vv", "recent"]);

    let config = apply_overrides(file_config, &args);
    assert_eq!(config.sample_rows, 3);
    assert_eq!(config.history_limit, 7);
    assert_eq!(config.store_path(), std::path::PathBuf::from("s.json"));
    assert_eq!(config.log_level, "TRACE");
    assert_eq!(config.level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_explicit_level_beats_verbosity() {
    let args = cli(&["-v", "--log-level", "warn", "recent"]);
    let config = apply_overrides(AppConfig::default(), &args);
    assert_eq!(config.level_filter(), log::LevelFilter::Warn);
}

#[test]
fn test_pivot_command_prints_json() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();
    let path = path.to_str().unwrap();

    let args = cli(&["pivot", path, "quarter", "region", "amount", "count"]);
    let output = execute(&args.command, &mut harness.workspace).unwrap();

    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["rowLabels"], serde_json::json!(["Q1", "Q2"]));
    assert_eq!(json["columnLabels"], serde_json::json!(["East", "North", "South"]));
    // count totals add per-cell counts: 4 numeric amounts overall
    assert_eq!(json["grandTotal"], 4.0);
}

#[test]
fn test_inspect_then_recent() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();
    let path = path.to_str().unwrap();

    let output = execute(&cli(&["inspect", path]).command, &mut harness.workspace).unwrap();
    assert!(output.contains("\"type\": \"date\""));

    let output = execute(&cli(&["recent"]).command, &mut harness.workspace).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json[0]["name"], path);
    assert_eq!(json[0]["rowCount"], 5);

    let output = execute(&cli(&["recent", "--clear"]).command, &mut harness.workspace).unwrap();
    assert_eq!(output, "[]");
}

#[test]
fn test_export_csv_command() {
    let mut harness = TestHarness::new();
    let path = harness.sales_csv();
    let out = harness.path("copy.csv");

    let args = cli(&["export", path.to_str().unwrap(), out.to_str().unwrap()]);
    let output = execute(&args.command, &mut harness.workspace).unwrap();
    assert!(output.contains("\"rowCount\": 5"));

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("region,quarter,amount,active,joined\n"));
    assert!(written.contains("South,Q1,20,,2024-03-15\n"));
}
