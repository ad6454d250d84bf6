//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for WorkHub integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use persistence::MemoryStore;
use tempfile::TempDir;
use workhub::{AppConfig, Workspace};

/// Sales fixture. `amount` holds one non-numeric value and `active` one blank.
pub const SALES_CSV: &str = "\
region,quarter,amount,active,joined
North,Q1,100,true,2024-01-05
North,Q2,150,false,2024-02-10
South,Q1,80,true,2024-03-01
South,Q1,20,,2024-03-15
East,Q2,n/a,true,2024-04-20
";

/// Test harness owning a scratch directory and an in-memory store.
pub struct TestHarness {
    pub dir: TempDir,
    pub workspace: Workspace,
}

impl TestHarness {
    /// Create a new test harness with default settings.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        TestHarness {
            dir: tempfile::tempdir().expect("create temp dir"),
            workspace: Workspace::new(config, Box::new(MemoryStore::new())),
        }
    }

    /// Writes `contents` to `name` inside the scratch directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// Writes the sales fixture and returns its path.
    pub fn sales_csv(&self) -> PathBuf {
        self.write_file("sales.csv", SALES_CSV)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
