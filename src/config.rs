//! Runtime configuration
//!
//! Loaded from a YAML file at startup. Fixture records for ledger seeding
//! live here rather than in code, so deployments control their own initial
//! state; the built-in defaults reproduce the classic two-record sample
//! data set.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::records::{Patient, Prescription};

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Snapshot directory for the store; purely in-memory when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Lexical bounds of the `queryAllDrugs` scan, start inclusive, end
    /// exclusive.
    #[serde(default = "default_scan_start")]
    pub scan_start: String,
    #[serde(default = "default_scan_end")]
    pub scan_end: String,
    /// Records written by `initLedger`.
    #[serde(default = "default_fixtures")]
    pub fixtures: Vec<Fixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub key: String,
    pub patient: Patient,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            scan_start: default_scan_start(),
            scan_end: default_scan_end(),
            fixtures: default_fixtures(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_scan_start() -> String {
    "DRUG0".to_string()
}

fn default_scan_end() -> String {
    "DRUG99".to_string()
}

fn default_fixtures() -> Vec<Fixture> {
    vec![
        Fixture {
            key: "DRUG0".to_string(),
            patient: sample_patient("Hydrocodone", "08/01/2018", "01/20/2019", "Schedule II"),
        },
        Fixture {
            key: "DRUG1".to_string(),
            patient: sample_patient("Simvastatin", "07/11/2018", "12/20/2018", "Schedule III"),
        },
    ]
}

fn sample_patient(name: &str, create_date: &str, expire_date: &str, schedule: &str) -> Patient {
    Patient {
        id: "111".to_string(),
        risk_level: "2".to_string(),
        prescriptions: vec![Prescription {
            name: name.to_string(),
            create_date: create_date.to_string(),
            expire_date: expire_date.to_string(),
            status: "Active".to_string(),
            controlled_substance: "Yes".to_string(),
            schedule: schedule.to_string(),
            dosage: "50".to_string(),
            brand: "Generic".to_string(),
            last_dispense_date: "08/03/2018".to_string(),
            number_of_refills: "1".to_string(),
            pharmacy: "BostonMA".to_string(),
        }],
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
}
