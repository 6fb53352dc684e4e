use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::Path;
use std::sync::RwLock;

use super::persistence::SnapshotManager;
use super::{KeyValueStore, RangeIter, StoreError};

/// In-memory ordered store. Point operations are safe for concurrent use;
/// scans iterate over a snapshot of the range taken at call time.
#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    snapshots: Option<SnapshotManager>,
}

impl MemoryStore {
    /// A purely in-memory store with no durability.
    pub fn new() -> Self {
        MemoryStore {
            entries: RwLock::new(BTreeMap::new()),
            snapshots: None,
        }
    }

    /// A store backed by a snapshot directory. Loads the previous snapshot
    /// when one exists, otherwise starts empty.
    pub fn open(base_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let snapshots = SnapshotManager::new(base_path)?;
        let entries = snapshots.load()?;
        Ok(MemoryStore {
            entries: RwLock::new(entries),
            snapshots: Some(snapshots),
        })
    }

    /// Writes every entry to the snapshot file. A no-op for stores opened
    /// without a snapshot directory.
    pub fn flush(&self) -> Result<(), StoreError> {
        if let Some(snapshots) = &self.snapshots {
            let entries = self.entries.read().unwrap();
            snapshots.save(&entries)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.write().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn scan(&self, start: &str, end: &str) -> Result<Box<dyn RangeIter>, StoreError> {
        // An inverted interval is empty, not a panic.
        if start >= end {
            return Ok(Box::new(MemoryRangeIter {
                entries: Vec::new().into_iter(),
            }));
        }

        let entries = self.entries.read().unwrap();
        let range: Vec<(String, Vec<u8>)> = entries
            .range::<str, _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Box::new(MemoryRangeIter {
            entries: range.into_iter(),
        }))
    }
}

struct MemoryRangeIter {
    entries: std::vec::IntoIter<(String, Vec<u8>)>,
}

impl RangeIter for MemoryRangeIter {
    fn next_entry(&mut self) -> Result<Option<(String, Vec<u8>)>, StoreError> {
        Ok(self.entries.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect_keys(store: &MemoryStore, start: &str, end: &str) -> Vec<String> {
        let mut iter = store.scan(start, end).unwrap();
        let mut keys = Vec::new();
        while let Some((key, _)) = iter.next_entry().unwrap() {
            keys.push(key);
        }
        keys
    }

    #[test]
    fn put_then_get_round_trips() {
        let store = MemoryStore::new();
        store.put("DRUG0", b"payload".to_vec()).unwrap();

        assert_eq!(store.get("DRUG0").unwrap(), Some(b"payload".to_vec()));
        assert_eq!(store.get("DRUG1").unwrap(), None);
    }

    #[test]
    fn put_replaces_existing_value() {
        let store = MemoryStore::new();
        store.put("DRUG0", b"old".to_vec()).unwrap();
        store.put("DRUG0", b"new".to_vec()).unwrap();

        assert_eq!(store.get("DRUG0").unwrap(), Some(b"new".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn scan_orders_keys_lexically_not_numerically() {
        let store = MemoryStore::new();
        for key in ["DRUG2", "DRUG10", "DRUG1"] {
            store.put(key, b"{}".to_vec()).unwrap();
        }

        assert_eq!(
            collect_keys(&store, "DRUG0", "DRUG99"),
            vec!["DRUG1", "DRUG10", "DRUG2"]
        );
    }

    #[test]
    fn scan_end_is_exclusive() {
        let store = MemoryStore::new();
        store.put("DRUG0", b"{}".to_vec()).unwrap();
        store.put("DRUG5", b"{}".to_vec()).unwrap();

        assert_eq!(collect_keys(&store, "DRUG0", "DRUG5"), vec!["DRUG0"]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let store = MemoryStore::new();
        store.put("DRUG0", b"{}".to_vec()).unwrap();

        assert!(collect_keys(&store, "DRUG9", "DRUG0").is_empty());
    }

    #[test]
    fn flush_and_reopen_restores_entries() {
        let dir = tempfile::tempdir().unwrap();

        let store = MemoryStore::open(dir.path()).unwrap();
        store.put("DRUG0", b"first".to_vec()).unwrap();
        store.put("DRUG1", b"second".to_vec()).unwrap();
        store.flush().unwrap();

        let reopened = MemoryStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("DRUG0").unwrap(), Some(b"first".to_vec()));
        assert_eq!(reopened.get("DRUG1").unwrap(), Some(b"second".to_vec()));
        assert_eq!(reopened.len(), 2);
    }
}
