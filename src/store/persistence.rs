use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::StoreError;

/// On-disk snapshot: a write timestamp plus every entry in key order.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    written_at: String,
    entries: Vec<SnapshotEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    key: String,
    value: Vec<u8>,
}

/// Manages storage and retrieval of store snapshots on disk.
#[derive(Debug)]
pub struct SnapshotManager {
    base_path: PathBuf,
}

impl SnapshotManager {
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = base_path.as_ref().to_path_buf();

        fs::create_dir_all(&base_path).map_err(|e| {
            StoreError::Persistence(format!("Failed to create snapshot directory: {}", e))
        })?;

        Ok(SnapshotManager { base_path })
    }

    /// Save all entries as one snapshot file.
    pub fn save(&self, entries: &BTreeMap<String, Vec<u8>>) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            written_at: Utc::now().to_rfc3339(),
            entries: entries
                .iter()
                .map(|(key, value)| SnapshotEntry {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
        };

        let serialized = serde_json::to_vec(&snapshot)
            .map_err(|e| StoreError::Persistence(format!("Serialization failed: {}", e)))?;

        // Write to a temporary file first
        let snapshot_path = self.snapshot_path();
        let temp_path = snapshot_path.with_extension("tmp");
        let mut file = File::create(&temp_path)
            .map_err(|e| StoreError::Persistence(format!("Failed to create file: {}", e)))?;

        file.write_all(&serialized)
            .map_err(|e| StoreError::Persistence(format!("Failed to write data: {}", e)))?;

        // Ensure data is flushed to disk
        file.sync_all()
            .map_err(|e| StoreError::Persistence(format!("Failed to sync data: {}", e)))?;

        // Rename temp file to final name (atomic operation on most filesystems)
        fs::rename(&temp_path, &snapshot_path)
            .map_err(|e| StoreError::Persistence(format!("Failed to rename file: {}", e)))?;

        Ok(())
    }

    /// Load the snapshot, or an empty entry set when none has been written.
    pub fn load(&self) -> Result<BTreeMap<String, Vec<u8>>, StoreError> {
        let snapshot_path = self.snapshot_path();
        if !snapshot_path.exists() {
            return Ok(BTreeMap::new());
        }

        let mut file = File::open(&snapshot_path)
            .map_err(|e| StoreError::Persistence(format!("Failed to open snapshot: {}", e)))?;

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .map_err(|e| StoreError::Persistence(format!("Failed to read snapshot: {}", e)))?;

        let snapshot: Snapshot =
            serde_json::from_slice(&buffer).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        Ok(snapshot
            .entries
            .into_iter()
            .map(|entry| (entry.key, entry.value))
            .collect())
    }

    fn snapshot_path(&self) -> PathBuf {
        self.base_path.join("ledger.snapshot")
    }
}
