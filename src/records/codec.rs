use super::{RecordError, StoredRecord};

/// Converts between domain records and the byte encoding used for storage
/// and response payloads. Pure and stateless; the same encoding is used on
/// both sides, so stored bytes are returned to callers unchanged.
pub trait RecordCodec {
    fn to_bytes(&self) -> Result<Vec<u8>, RecordError>;
    fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError>
    where
        Self: Sized;
}

impl RecordCodec for StoredRecord {
    fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        serde_json::to_vec(self).map_err(|e| RecordError::Encode(e.to_string()))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        serde_json::from_slice(bytes).map_err(|e| RecordError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Drug, Patient, Prescription};
    use pretty_assertions::assert_eq;

    fn sample_record() -> StoredRecord {
        StoredRecord::Patient(Patient {
            id: "222".to_string(),
            risk_level: "1".to_string(),
            prescriptions: vec![Prescription {
                name: "Simvastatin".to_string(),
                create_date: "07/11/2018".to_string(),
                expire_date: "12/20/2018".to_string(),
                status: "Active".to_string(),
                controlled_substance: "Yes".to_string(),
                schedule: "Schedule III".to_string(),
                dosage: "50".to_string(),
                brand: "Generic".to_string(),
                last_dispense_date: "08/03/2018".to_string(),
                number_of_refills: "1".to_string(),
                pharmacy: "BostonMA".to_string(),
            }],
        })
    }

    #[test]
    fn patient_round_trip() {
        let record = sample_record();
        let bytes = record.to_bytes().unwrap();
        let decoded = StoredRecord::from_bytes(&bytes).unwrap();

        assert_eq!(record, decoded);
    }

    #[test]
    fn drug_round_trip() {
        let record = StoredRecord::Drug(Drug {
            prescription_name: "Hydrocodone".to_string(),
            prescription_date: "08/01/2018".to_string(),
            status: "Active".to_string(),
            controlled_substance: "Yes".to_string(),
        });
        let bytes = record.to_bytes().unwrap();
        let decoded = StoredRecord::from_bytes(&bytes).unwrap();

        assert_eq!(record, decoded);
    }

    #[test]
    fn malformed_bytes_surface_a_decode_error() {
        let result = StoredRecord::from_bytes(b"not json at all");

        match result {
            Err(RecordError::Decode(_)) => {}
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn untagged_bytes_surface_a_decode_error() {
        // Valid JSON but missing the RecordType tag must not decode into a
        // zero-valued record.
        let result = StoredRecord::from_bytes(b"{\"Status\":\"Inactive\"}");

        assert!(matches!(result, Err(RecordError::Decode(_))));
    }

    #[test]
    fn legacy_patient_without_status_defaults_to_active() {
        let bytes = br#"{
            "RecordType": "Patient",
            "Id": "111",
            "RiskLevel": "2",
            "Prescriptions": [{
                "Name": "Hydrocodone",
                "CreateDate": "08/01/2018",
                "ExpireDate": "01/20/2019",
                "ControlledSubstance": "Yes",
                "Schedule": "Schedule II",
                "Dosage": "50",
                "Brand": "Generic",
                "LastDispenseDate": "08/03/2018",
                "NumberOfRefills": "1",
                "Pharmacy": "BostonMA"
            }]
        }"#;
        let decoded = StoredRecord::from_bytes(bytes).unwrap();

        match decoded {
            StoredRecord::Patient(patient) => {
                assert_eq!(patient.prescriptions[0].status, "Active");
            }
            StoredRecord::Drug(_) => panic!("decoded as wrong shape"),
        }
    }
}
