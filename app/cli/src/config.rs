//! FILENAME: app/cli/src/config.rs
// PURPOSE: Application settings read from a JSON file, overridable per run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use engine::{HistoryOptions, InferenceOptions, DEFAULT_MAX_HISTORY_SIZE, DEFAULT_SAMPLE_SIZE};
use log::LevelFilter;
use persistence::DEFAULT_RECENT_LIMIT;
use serde::{Deserialize, Serialize};

/// File picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "workhub.json";

pub const DEFAULT_STORE_FILE: &str = "workhub-store.json";

/// Settings for one run. Missing fields in the file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum number of undo entries kept by the interactive session.
    pub history_limit: usize,
    /// Leading rows sampled per column by type inference.
    pub sample_rows: usize,
    /// Length of the recent-work list.
    pub recent_limit: usize,
    pub log_file: Option<PathBuf>,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    pub store_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_MAX_HISTORY_SIZE,
            sample_rows: DEFAULT_SAMPLE_SIZE,
            recent_limit: DEFAULT_RECENT_LIMIT,
            log_file: None,
            log_level: "info".to_string(),
            store_path: None,
        }
    }
}

impl AppConfig {
    /// Reads `path`, or `workhub.json` in the working directory when `path`
    /// is `None`. Only an explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }

    pub fn inference_options(&self) -> InferenceOptions {
        InferenceOptions {
            sample_size: self.sample_rows,
        }
    }

    pub fn history_options(&self) -> HistoryOptions {
        HistoryOptions {
            max_history_size: self.history_limit,
        }
    }
}
