//! Research history storage.
//!
//! Reports are stored verbatim and never mutated. The store is in-memory
//! with an optional JSON file behind it: the file is loaded once at
//! startup and rewritten best-effort on every mutation. Persistence
//! failures are logged and never fail a request.

use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::types::{ConsolidatedResult, HistoryEntry, HistorySummary};

/// Capped, optionally-persisted store of research reports.
pub struct HistoryStore {
    entries: RwLock<Vec<HistoryEntry>>,
    max_entries: usize,
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// In-memory store evicting oldest entries beyond `max_entries`.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            max_entries,
            path: None,
        }
    }

    /// Store persisted to a JSON file; existing contents are loaded now.
    pub fn with_persistence(path: PathBuf, max_entries: usize) -> Self {
        let entries = Self::load(&path);
        Self {
            entries: RwLock::new(entries),
            max_entries,
            path: Some(path),
        }
    }

    /// Record a report, returning the stored entry with its assigned id.
    pub fn record(&self, result: ConsolidatedResult) -> HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            query: result.query.clone(),
            domain: result.domain,
            timestamp: result.timestamp,
            result,
        };

        let mut entries = self.entries.write();
        entries.push(entry.clone());
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(..excess);
        }
        self.persist(&entries);

        entry
    }

    /// Listing rows, most recent first.
    pub fn summaries(&self) -> Vec<HistorySummary> {
        self.entries
            .read()
            .iter()
            .rev()
            .map(HistorySummary::from)
            .collect()
    }

    /// Fetch a stored entry by id.
    pub fn get(&self, id: Uuid) -> Option<HistoryEntry> {
        self.entries
            .read()
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
    }

    /// Drop every stored entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
        self.persist(&entries);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn load(path: &PathBuf) -> Vec<HistoryEntry> {
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), %e, "history file unreadable, starting empty");
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "history file unreadable, starting empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, entries: &[HistoryEntry]) {
        let Some(path) = &self.path else {
            return;
        };
        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::warn!(%e, "failed to serialize history");
                return;
            }
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(path, serialized) {
            tracing::warn!(path = %path.display(), %e, "failed to persist history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidation::ResultConsolidator;
    use crate::types::Domain;

    fn report(query: &str) -> ConsolidatedResult {
        ResultConsolidator::new().consolidate(query, Domain::General, &[], 0.0)
    }

    #[test]
    fn test_record_and_get() {
        let store = HistoryStore::new(10);
        let entry = store.record(report("alpha"));

        let fetched = store.get(entry.id).unwrap();
        assert_eq!(fetched.query, "alpha");
        assert!(store.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_summaries_are_most_recent_first() {
        let store = HistoryStore::new(10);
        store.record(report("first"));
        store.record(report("second"));

        let summaries = store.summaries();
        assert_eq!(summaries[0].query, "second");
        assert_eq!(summaries[1].query, "first");
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let store = HistoryStore::new(2);
        store.record(report("a"));
        store.record(report("b"));
        store.record(report("c"));

        assert_eq!(store.len(), 2);
        let queries: Vec<String> = store.summaries().iter().map(|s| s.query.clone()).collect();
        assert_eq!(queries, vec!["c", "b"]);
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        {
            let store = HistoryStore::with_persistence(path.clone(), 10);
            store.record(report("persisted query"));
        }

        let reloaded = HistoryStore::with_persistence(path, 10);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.summaries()[0].query, "persisted query");
    }

    #[test]
    fn test_corrupt_history_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        let store = HistoryStore::with_persistence(path, 10);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_empties_store_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = HistoryStore::with_persistence(path.clone(), 10);
        store.record(report("gone"));
        store.clear();

        assert!(store.is_empty());
        let reloaded = HistoryStore::with_persistence(path, 10);
        assert!(reloaded.is_empty());
    }
}
