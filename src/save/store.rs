//! Append-only in-memory save store
//!
//! Records are never mutated after they are appended. Capture and restore
//! both clone, so a stored snapshot never aliases live session state.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::config::AUTOSAVE_INTERVAL_MINUTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveKind {
    Auto,
    Manual,
}

/// One immutable snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRecord<T> {
    id: u64,
    kind: SaveKind,
    timestamp_ms: u64,
    state: T,
}

impl<T> SaveRecord<T> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> SaveKind {
        self.kind
    }

    /// Wall-clock capture time in milliseconds since the Unix epoch
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    pub fn state(&self) -> &T {
        &self.state
    }
}

#[derive(Debug, Clone)]
pub struct SaveStore<T> {
    records: Vec<SaveRecord<T>>,
    next_id: u64,
    /// `None` until the first autosave, so the first check always saves
    last_auto_save_minute: Option<u64>,
}

impl<T> Default for SaveStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            last_auto_save_minute: None,
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl<T: Clone> SaveStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&mut self, kind: SaveKind, state: &T) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(SaveRecord {
            id,
            kind,
            timestamp_ms: now_ms(),
            state: state.clone(),
        });
        id
    }

    /// Store an autosave when at least `AUTOSAVE_INTERVAL_MINUTES` have
    /// passed since the previous one. Returns the new record id if saved.
    pub fn auto_save_if_due(&mut self, elapsed_minutes: u64, state: &T) -> Option<u64> {
        if let Some(last) = self.last_auto_save_minute {
            if elapsed_minutes.saturating_sub(last) < AUTOSAVE_INTERVAL_MINUTES {
                return None;
            }
        }
        self.last_auto_save_minute = Some(elapsed_minutes);
        Some(self.append(SaveKind::Auto, state))
    }

    pub fn manual_save(&mut self, state: &T) -> u64 {
        self.append(SaveKind::Manual, state)
    }

    /// Most recently appended record of either kind
    pub fn latest(&self) -> Option<&SaveRecord<T>> {
        self.records.last()
    }

    /// Owned copy of the most recent snapshot
    pub fn load_latest(&self) -> Option<T> {
        self.latest().map(|record| record.state.clone())
    }

    pub fn records(&self) -> impl Iterator<Item = &SaveRecord<T>> {
        self.records.iter()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn last_auto_save_minute(&self) -> Option<u64> {
        self.last_auto_save_minute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_nothing() {
        let store: SaveStore<Vec<u32>> = SaveStore::new();
        assert!(store.load_latest().is_none());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_ids_are_monotonic_across_kinds() {
        let mut store = SaveStore::new();
        let a = store.manual_save(&1);
        let b = store.auto_save_if_due(0, &2).unwrap();
        let c = store.manual_save(&3);
        assert!(a < b && b < c);
        let kinds: Vec<SaveKind> = store.records().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec![SaveKind::Manual, SaveKind::Auto, SaveKind::Manual]);
    }

    #[test]
    fn test_autosave_interval() {
        let mut store = SaveStore::new();
        assert!(store.auto_save_if_due(0, &"first").is_some());
        assert!(store.auto_save_if_due(9, &"too soon").is_none());
        assert!(store.auto_save_if_due(10, &"due").is_some());
        assert_eq!(store.last_auto_save_minute(), Some(10));
        assert!(store.auto_save_if_due(19, &"too soon").is_none());
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_manual_save_does_not_reset_autosave_clock() {
        let mut store = SaveStore::new();
        store.auto_save_if_due(0, &0);
        store.manual_save(&1);
        assert!(store.auto_save_if_due(10, &2).is_some());
    }

    #[test]
    fn test_latest_of_either_kind() {
        let mut store = SaveStore::new();
        store.manual_save(&"manual");
        store.auto_save_if_due(3, &"auto");
        assert_eq!(store.load_latest(), Some("auto"));
        assert_eq!(store.latest().map(|r| r.kind()), Some(SaveKind::Auto));
    }

    #[test]
    fn test_snapshots_do_not_alias() {
        let mut store = SaveStore::new();
        let mut live = vec![1, 2, 3];
        store.manual_save(&live);

        live.push(4);
        assert_eq!(store.load_latest(), Some(vec![1, 2, 3]));

        let mut restored = store.load_latest().unwrap();
        restored.clear();
        assert_eq!(store.latest().unwrap().state(), &vec![1, 2, 3]);
    }
}
