//! RxLedger: a prescription-record ledger over an ordered key-value store
//!
//! RxLedger maps five named ledger operations (seed, create, point query,
//! range query, status update) onto an abstract ordered key-value store,
//! with JSON record encoding and a range aggregator that assembles stored
//! records into one array response.

pub mod api;
pub mod config;
pub mod error;
pub mod ops;
pub mod records;
pub mod store;

pub use error::RxError;
pub use ops::{Ledger, OpError};
pub use records::{Drug, Patient, Prescription, StoredRecord};
pub use store::{KeyValueStore, MemoryStore, RangeIter, StoreError};
