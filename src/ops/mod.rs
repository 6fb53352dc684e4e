//! Ledger operations
//!
//! The five named operations and their dispatch:
//! - `initLedger` — seed the store with configured fixture records
//! - `createDrug` — write one patient record with one prescription
//! - `queryDrug` — point read of raw stored bytes
//! - `queryAllDrugs` — range scan aggregated into a JSON array
//! - `changeDrugStatus` — read-modify-write of the stored status
//!
//! Arity is validated before any store access, so a failed operation never
//! mutates the store.

mod ledger;
mod range;

pub use ledger::Ledger;
pub use range::aggregate_range;

use std::fmt;

use crate::records::RecordError;
use crate::store::StoreError;

#[derive(Debug)]
pub enum OpError {
    ArgumentCount {
        function: &'static str,
        expected: usize,
        actual: usize,
    },
    UnknownOperation(String),
    RecordNotFound(String),
    Decode(RecordError),
    Store(StoreError),
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpError::ArgumentCount {
                function,
                expected,
                actual,
            } => write!(
                f,
                "Incorrect number of arguments for {}. Expecting {}, got {}",
                function, expected, actual
            ),
            OpError::UnknownOperation(name) => {
                write!(f, "Invalid ledger function name: {}", name)
            }
            OpError::RecordNotFound(key) => write!(f, "No record stored under key {}", key),
            OpError::Decode(err) => write!(f, "{}", err),
            OpError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for OpError {}

impl From<StoreError> for OpError {
    fn from(error: StoreError) -> Self {
        OpError::Store(error)
    }
}

impl From<RecordError> for OpError {
    fn from(error: RecordError) -> Self {
        OpError::Decode(error)
    }
}
