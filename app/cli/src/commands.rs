//! FILENAME: app/cli/src/commands.rs
// PURPOSE: One function per front-end command, each returning a serializable report.
// CONTEXT: Commands share a Workspace holding the settings and the key-value
// store. Every successful load is recorded in the recent-work list.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use engine::{Column, ParsedTable};
use persistence::{KeyValueStore, RecentEntry, RecentWork, TableFormat};
use pivot_engine::{
    calculate_pivot, column_statistics, group_and_aggregate, AggregateFunction, ColumnStatistics,
    PivotDefinition, PivotResult,
};
use serde::Serialize;

use crate::config::AppConfig;

// ============================================================================
// REPORTS
// ============================================================================

/// Output of `inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub source_name: String,
    pub row_count: usize,
    pub columns: Vec<Column>,
}

impl TableSummary {
    pub fn of(table: &ParsedTable) -> Self {
        TableSummary {
            source_name: table.source_name.clone(),
            row_count: table.row_count,
            columns: table.columns.clone(),
        }
    }
}

/// Output of `group`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReport {
    pub group_by: String,
    pub value_field: String,
    pub aggregation: AggregateFunction,
    pub groups: BTreeMap<String, f64>,
}

/// Output of `export`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub output: String,
    pub row_count: usize,
}

// ============================================================================
// WORKSPACE
// ============================================================================

pub struct Workspace {
    config: AppConfig,
    store: Box<dyn KeyValueStore>,
}

impl Workspace {
    pub fn new(config: AppConfig, store: Box<dyn KeyValueStore>) -> Self {
        Workspace { config, store }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loads a table from disk and records it as recent work.
    pub fn load(&mut self, path: &Path) -> Result<ParsedTable> {
        let table = persistence::load_table(path, &self.config.inference_options())
            .with_context(|| format!("loading {}", path.display()))?;

        let format = TableFormat::from_file_name(&table.source_name)?;
        let mut recent = RecentWork::load(&*self.store, self.config.recent_limit)?;
        recent.record(RecentEntry::new(path.display().to_string(), format, table.row_count));
        recent.save(&mut *self.store)?;

        Ok(table)
    }

    pub fn inspect(&mut self, path: &Path) -> Result<TableSummary> {
        let table = self.load(path)?;
        Ok(TableSummary::of(&table))
    }

    pub fn stats(&mut self, path: &Path, column: &str) -> Result<ColumnStatistics> {
        let table = self.load(path)?;
        stats_for(&table, column)
    }

    pub fn group(
        &mut self,
        path: &Path,
        by: &str,
        value: &str,
        function: AggregateFunction,
    ) -> Result<GroupReport> {
        let table = self.load(path)?;
        group_for(&table, by, value, function)
    }

    pub fn pivot(&mut self, path: &Path, definition: &PivotDefinition) -> Result<PivotResult> {
        let table = self.load(path)?;
        pivot_for(&table, definition)
    }

    pub fn export(&mut self, path: &Path, output: &Path) -> Result<ExportReport> {
        let table = self.load(path)?;
        persistence::save_table(&table, output)
            .with_context(|| format!("writing {}", output.display()))?;
        Ok(ExportReport {
            output: output.display().to_string(),
            row_count: table.row_count,
        })
    }

    pub fn recent(&self) -> Result<Vec<RecentEntry>> {
        let recent = RecentWork::load(&*self.store, self.config.recent_limit)?;
        Ok(recent.entries().to_vec())
    }

    pub fn clear_recent(&mut self) -> Result<()> {
        let mut recent = RecentWork::load(&*self.store, self.config.recent_limit)?;
        recent.clear();
        recent.save(&mut *self.store)?;
        Ok(())
    }
}

// ============================================================================
// TABLE-LEVEL OPERATIONS
// ============================================================================

fn require_column(table: &ParsedTable, key: &str) -> Result<()> {
    if table.column(key).is_some() {
        Ok(())
    } else {
        let known: Vec<&str> = table.column_keys().collect();
        Err(anyhow!(
            "unknown column {:?} in {} (columns: {})",
            key,
            table.source_name,
            known.join(", ")
        ))
    }
}

pub fn stats_for(table: &ParsedTable, column: &str) -> Result<ColumnStatistics> {
    column_statistics(table, column).ok_or_else(|| {
        anyhow!("unknown column {:?} in {}", column, table.source_name)
    })
}

pub fn group_for(
    table: &ParsedTable,
    by: &str,
    value: &str,
    function: AggregateFunction,
) -> Result<GroupReport> {
    require_column(table, by)?;
    require_column(table, value)?;
    Ok(GroupReport {
        group_by: by.to_string(),
        value_field: value.to_string(),
        aggregation: function,
        groups: group_and_aggregate(&table.rows, by, value, function),
    })
}

pub fn pivot_for(table: &ParsedTable, definition: &PivotDefinition) -> Result<PivotResult> {
    require_column(table, &definition.row_field)?;
    require_column(table, &definition.column_field)?;
    require_column(table, &definition.value_field)?;
    Ok(calculate_pivot(table, definition))
}

/// Pretty JSON for stdout.
pub fn render<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
