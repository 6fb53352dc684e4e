//! Ordered key-value store abstraction
//!
//! The capability the ledger core depends on:
//! - point get and put
//! - ordered range iteration over keys
//!
//! Keys are compared lexically, so `"DRUG10"` sorts before `"DRUG2"`. The
//! provided `MemoryStore` keeps everything in an in-memory ordered tree with
//! optional snapshot persistence.

mod memory;
mod persistence;

pub use memory::MemoryStore;
pub use persistence::SnapshotManager;

use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    Persistence(String),
    Corrupt(String),
    Iteration(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
            StoreError::Corrupt(msg) => write!(f, "Corrupt snapshot: {}", msg),
            StoreError::Iteration(msg) => write!(f, "Range iteration failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// An ordered iterator over a key range. The iterator owns whatever resources
/// the scan needs; dropping it releases them, on success and error paths
/// alike.
pub trait RangeIter {
    /// Produces the next `(key, value)` entry in lexical key order, `None`
    /// when the range is exhausted.
    fn next_entry(&mut self) -> Result<Option<(String, Vec<u8>)>, StoreError>;
}

/// The ordered key-value capability the ledger operations run against.
pub trait KeyValueStore: Send + Sync {
    /// Point read. Absent keys are `None`, not an error.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Point write, unconditionally replacing any existing value.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Ordered iteration over `[start, end)` — start inclusive, end
    /// exclusive, lexical comparison.
    fn scan(&self, start: &str, end: &str) -> Result<Box<dyn RangeIter>, StoreError>;
}
