//! Domain record types
//!
//! The prescription-ledger records that get stored under ledger keys:
//! - `Patient` with its owned `Prescription` list, the shape written by
//!   seeding and creation
//! - `Drug`, a legacy flat shape still readable for stores populated by
//!   older tooling
//!
//! Every stored value is a tagged `StoredRecord`, so readers always know
//! which shape they are decoding.

pub mod codec;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug)]
pub enum RecordError {
    Decode(String),
    Encode(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Decode(msg) => write!(f, "Failed to decode record: {}", msg),
            RecordError::Encode(msg) => write!(f, "Failed to encode record: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {}

/// A single prescription owned by a patient record. All fields are free-form
/// text; no date or numeric typing is enforced at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Prescription {
    pub name: String,
    pub create_date: String,
    pub expire_date: String,
    /// Dispensing status, `"Active"` when first written.
    #[serde(default = "active_status")]
    pub status: String,
    pub controlled_substance: String,
    pub schedule: String,
    pub dosage: String,
    pub brand: String,
    pub last_dispense_date: String,
    pub number_of_refills: String,
    pub pharmacy: String,
}

fn active_status() -> String {
    "Active".to_string()
}

/// The unit of storage under one ledger key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Patient {
    pub id: String,
    pub risk_level: String,
    pub prescriptions: Vec<Prescription>,
}

/// Legacy flat record shape. Never written by seeding or creation, but kept
/// readable so status updates work against stores filled by older tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Drug {
    pub prescription_name: String,
    pub prescription_date: String,
    pub status: String,
    pub controlled_substance: String,
}

/// Tagged union of everything the ledger stores. The `RecordType` tag makes
/// decoding unambiguous; a value decodes as exactly the shape it was written
/// as, never coerced into the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "RecordType")]
pub enum StoredRecord {
    Patient(Patient),
    Drug(Drug),
}

impl StoredRecord {
    /// Applies a status update to whichever shape is stored. Patient records
    /// carry status on each owned prescription; legacy drug records carry it
    /// directly.
    pub fn set_status(&mut self, status: &str) {
        match self {
            StoredRecord::Patient(patient) => {
                for prescription in &mut patient.prescriptions {
                    prescription.status = status.to_string();
                }
            }
            StoredRecord::Drug(drug) => {
                drug.status = status.to_string();
            }
        }
    }
}
