use std::sync::Mutex;

use tracing::info;

use super::range::aggregate_range;
use super::OpError;
use crate::config::LedgerConfig;
use crate::records::codec::RecordCodec;
use crate::records::{Patient, Prescription, StoredRecord};
use crate::store::KeyValueStore;

/// The record-management core: maps the five ledger operation names onto
/// validated mutations and queries against the underlying store.
pub struct Ledger<S> {
    store: S,
    config: LedgerConfig,
    // Serializes whole invocations so a read-modify-write is never
    // interleaved with another operation's write to the same key.
    op_lock: Mutex<()>,
}

impl<S: KeyValueStore> Ledger<S> {
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Ledger {
            store,
            config,
            op_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Dispatches one named operation. The payload is empty for mutations;
    /// queries return the storage encoding unchanged, except `queryAllDrugs`
    /// which wraps entries in a JSON array envelope.
    pub fn invoke(&self, function: &str, args: &[String]) -> Result<Vec<u8>, OpError> {
        let _guard = self.op_lock.lock().unwrap();

        match function {
            "queryDrug" => self.query_drug(args),
            "initLedger" => self.init_ledger(args),
            "createDrug" => self.create_drug(args),
            "queryAllDrugs" => self.query_all_drugs(args),
            "changeDrugStatus" => self.change_drug_status(args),
            other => Err(OpError::UnknownOperation(other.to_string())),
        }
    }

    fn query_drug(&self, args: &[String]) -> Result<Vec<u8>, OpError> {
        require_arity("queryDrug", 1, args)?;

        // An absent key is an empty payload, not an error.
        Ok(self.store.get(&args[0])?.unwrap_or_default())
    }

    fn init_ledger(&self, args: &[String]) -> Result<Vec<u8>, OpError> {
        require_arity("initLedger", 0, args)?;

        for fixture in &self.config.fixtures {
            let record = StoredRecord::Patient(fixture.patient.clone());
            self.store.put(&fixture.key, record.to_bytes()?)?;
            info!(key = %fixture.key, "seeded fixture record");
        }

        Ok(Vec::new())
    }

    fn create_drug(&self, args: &[String]) -> Result<Vec<u8>, OpError> {
        require_arity("createDrug", 13, args)?;

        let patient = Patient {
            id: args[1].clone(),
            risk_level: args[2].clone(),
            prescriptions: vec![Prescription {
                name: args[3].clone(),
                create_date: args[4].clone(),
                expire_date: args[5].clone(),
                status: "Active".to_string(),
                controlled_substance: args[6].clone(),
                schedule: args[7].clone(),
                dosage: args[8].clone(),
                brand: args[9].clone(),
                last_dispense_date: args[10].clone(),
                number_of_refills: args[11].clone(),
                pharmacy: args[12].clone(),
            }],
        };

        let record = StoredRecord::Patient(patient);
        self.store.put(&args[0], record.to_bytes()?)?;

        Ok(Vec::new())
    }

    fn query_all_drugs(&self, args: &[String]) -> Result<Vec<u8>, OpError> {
        require_arity("queryAllDrugs", 0, args)?;

        let mut iter = self
            .store
            .scan(&self.config.scan_start, &self.config.scan_end)?;
        let payload = aggregate_range(iter.as_mut())?;
        info!(bytes = payload.len(), "assembled range query response");

        Ok(payload)
    }

    fn change_drug_status(&self, args: &[String]) -> Result<Vec<u8>, OpError> {
        require_arity("changeDrugStatus", 2, args)?;

        let key = &args[0];
        let bytes = self
            .store
            .get(key)?
            .ok_or_else(|| OpError::RecordNotFound(key.clone()))?;

        // Decode exactly the shape that was stored; a malformed record is a
        // surfaced error, never a zero-valued fallback.
        let mut record = StoredRecord::from_bytes(&bytes)?;
        record.set_status(&args[1]);
        self.store.put(key, record.to_bytes()?)?;

        Ok(Vec::new())
    }
}

fn require_arity(function: &'static str, expected: usize, args: &[String]) -> Result<(), OpError> {
    if args.len() != expected {
        return Err(OpError::ArgumentCount {
            function,
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}
