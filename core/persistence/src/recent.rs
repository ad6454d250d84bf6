//! FILENAME: core/persistence/src/recent.rs
//! PURPOSE: The "recently opened" list shown by the front end.
//! CONTEXT: Stored as a JSON array under a single key of a KeyValueStore.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::TableFormat;
use crate::store::KeyValueStore;

/// Store key holding the serialized list.
pub const RECENT_WORK_KEY: &str = "workhub.recentWork";

pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// One previously loaded source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    /// File name or path the table was loaded from.
    pub name: String,
    pub format: TableFormat,
    pub row_count: usize,
    pub opened_at: DateTime<Utc>,
}

impl RecentEntry {
    pub fn new(name: impl Into<String>, format: TableFormat, row_count: usize) -> Self {
        RecentEntry {
            name: name.into(),
            format,
            row_count,
            opened_at: Utc::now(),
        }
    }
}

/// Bounded list of recent sources, most recent first, one entry per name.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentWork {
    entries: Vec<RecentEntry>,
    limit: usize,
}

impl RecentWork {
    pub fn new(limit: usize) -> Self {
        RecentWork {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Reads the list from `store`. An unreadable value is discarded with a
    /// warning rather than failing the caller.
    pub fn load(store: &dyn KeyValueStore, limit: usize) -> Result<Self> {
        let mut recent = RecentWork::new(limit);
        if let Some(raw) = store.get(RECENT_WORK_KEY)? {
            match serde_json::from_str::<Vec<RecentEntry>>(&raw) {
                Ok(entries) => {
                    recent.entries = entries;
                    recent.entries.truncate(recent.limit);
                }
                Err(e) => {
                    log::warn!(target: "STORE", "discarding unreadable recent-work list: {}", e);
                }
            }
        }
        Ok(recent)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        store.set(RECENT_WORK_KEY, &json)
    }

    /// Moves `entry` to the front, replacing any older entry with the same name.
    pub fn record(&mut self, entry: RecentEntry) {
        self.entries.retain(|e| e.name != entry.name);
        self.entries.insert(0, entry);
        self.entries.truncate(self.limit);
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|e| e.name != name);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn names(recent: &RecentWork) -> Vec<&str> {
        recent.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_most_recent_first_without_duplicates() {
        let mut recent = RecentWork::new(5);
        recent.record(RecentEntry::new("a.csv", TableFormat::Csv, 1));
        recent.record(RecentEntry::new("b.xlsx", TableFormat::Spreadsheet, 2));
        recent.record(RecentEntry::new("a.csv", TableFormat::Csv, 3));

        assert_eq!(names(&recent), vec!["a.csv", "b.xlsx"]);
        assert_eq!(recent.entries()[0].row_count, 3);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut recent = RecentWork::new(2);
        for name in ["a", "b", "c"] {
            recent.record(RecentEntry::new(name, TableFormat::Csv, 0));
        }
        assert_eq!(names(&recent), vec!["c", "b"]);
    }

    #[test]
    fn test_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let mut recent = RecentWork::new(3);
        recent.record(RecentEntry::new("sales.csv", TableFormat::Csv, 12));
        recent.save(&mut store).unwrap();

        let loaded = RecentWork::load(&store, 3).unwrap();
        assert_eq!(loaded, recent);

        let raw = store.get(RECENT_WORK_KEY).unwrap().unwrap();
        assert!(raw.contains("\"rowCount\":12"));
        assert!(raw.contains("\"format\":\"csv\""));
    }

    #[test]
    fn test_unreadable_value_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(RECENT_WORK_KEY, "{broken").unwrap();
        let loaded = RecentWork::load(&store, 3).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut recent = RecentWork::new(DEFAULT_RECENT_LIMIT);
        recent.record(RecentEntry::new("a", TableFormat::Csv, 0));
        recent.record(RecentEntry::new("b", TableFormat::Csv, 0));
        recent.remove("a");
        assert_eq!(names(&recent), vec!["b"]);
        recent.clear();
        assert!(recent.is_empty());
        assert_eq!(recent.limit(), DEFAULT_RECENT_LIMIT);
    }
}
