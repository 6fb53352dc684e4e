use crate::store::{RangeIter, StoreError};

/// Assembles the entries produced by a range iterator into one JSON array,
/// preserving the store's iteration order. Each element is
/// `{"Key": <key>, "Record": <stored value>}` with the stored value embedded
/// as a JSON value, not a string.
///
/// An iterator failure at any point short-circuits the whole aggregation;
/// the partial buffer is discarded and the iterator is released by drop.
pub fn aggregate_range(iter: &mut dyn RangeIter) -> Result<Vec<u8>, StoreError> {
    let mut buffer = String::from("[");

    // Suppress the comma for the first array member only; a misplaced
    // separator here would make the whole payload invalid JSON.
    let mut member_written = false;

    while let Some((key, value)) = iter.next_entry()? {
        if member_written {
            buffer.push(',');
        }
        buffer.push_str("{\"Key\":");
        buffer.push_str(&serde_json::Value::String(key).to_string());
        buffer.push_str(", \"Record\":");
        // The stored value is already encoded JSON, so it is embedded as-is.
        buffer.push_str(&String::from_utf8_lossy(&value));
        buffer.push('}');
        member_written = true;
    }

    buffer.push(']');
    Ok(buffer.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedIter {
        entries: std::vec::IntoIter<(String, Vec<u8>)>,
    }

    impl FixedIter {
        fn new(entries: Vec<(&str, &str)>) -> Self {
            FixedIter {
                entries: entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
                    .collect::<Vec<_>>()
                    .into_iter(),
            }
        }
    }

    impl RangeIter for FixedIter {
        fn next_entry(&mut self) -> Result<Option<(String, Vec<u8>)>, StoreError> {
            Ok(self.entries.next())
        }
    }

    /// Yields one good entry, then fails.
    struct FailingIter {
        yielded: bool,
    }

    impl RangeIter for FailingIter {
        fn next_entry(&mut self) -> Result<Option<(String, Vec<u8>)>, StoreError> {
            if self.yielded {
                Err(StoreError::Iteration("backing scan failed".to_string()))
            } else {
                self.yielded = true;
                Ok(Some(("DRUG0".to_string(), b"{}".to_vec())))
            }
        }
    }

    #[test]
    fn empty_range_yields_the_literal_empty_array() {
        let mut iter = FixedIter::new(vec![]);

        assert_eq!(aggregate_range(&mut iter).unwrap(), b"[]".to_vec());
    }

    #[test]
    fn single_entry_has_no_separator() {
        let mut iter = FixedIter::new(vec![("DRUG0", "{\"A\":1}")]);
        let payload = aggregate_range(&mut iter).unwrap();

        assert_eq!(
            String::from_utf8(payload).unwrap(),
            "[{\"Key\":\"DRUG0\", \"Record\":{\"A\":1}}]"
        );
    }

    #[test]
    fn members_are_comma_separated_and_parse_as_json() {
        let mut iter = FixedIter::new(vec![
            ("DRUG0", "{\"A\":1}"),
            ("DRUG1", "{\"B\":2}"),
            ("DRUG2", "{\"C\":3}"),
        ]);
        let payload = aggregate_range(&mut iter).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        let elements = parsed.as_array().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0]["Key"], "DRUG0");
        assert_eq!(elements[0]["Record"]["A"], 1);
        assert_eq!(elements[2]["Key"], "DRUG2");
    }

    #[test]
    fn keys_are_json_escaped() {
        let mut iter = FixedIter::new(vec![("DRUG\"0", "{}")]);
        let payload = aggregate_range(&mut iter).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(parsed[0]["Key"], "DRUG\"0");
    }

    #[test]
    fn iterator_failure_discards_partial_results() {
        let mut iter = FailingIter { yielded: false };

        assert!(matches!(
            aggregate_range(&mut iter),
            Err(StoreError::Iteration(_))
        ));
    }
}
