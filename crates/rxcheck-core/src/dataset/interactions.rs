//! Drug-interaction table.

use serde::Deserialize;

use super::{distinct_in_order, parse_rows, DatasetError, DatasetFingerprint, DatasetResult};
use crate::models::InteractionRecord;

#[derive(Deserialize)]
struct InteractionRow {
    #[serde(rename = "Drug 1")]
    drug_1: String,
    #[serde(rename = "Drug 2")]
    drug_2: String,
    #[serde(rename = "Interaction Description")]
    description: String,
}

/// Known interaction pairs, in file order.
#[derive(Debug, Clone)]
pub struct InteractionTable {
    records: Vec<InteractionRecord>,
    /// Distinct `Drug 1` values, first-seen order
    first_names: Vec<String>,
    /// Distinct `Drug 2` values, first-seen order
    second_names: Vec<String>,
    fingerprint: DatasetFingerprint,
}

impl InteractionTable {
    /// Parse a CSV with columns `Drug 1, Drug 2, Interaction Description`.
    ///
    /// An empty table is rejected: the name matcher needs candidates.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> DatasetResult<Self> {
        let rows: Vec<InteractionRow> = parse_rows(name, bytes)?;
        if rows.is_empty() {
            return Err(DatasetError::Empty(name.to_string()));
        }

        let records: Vec<InteractionRecord> = rows
            .into_iter()
            .map(|r| InteractionRecord::new(r.drug_1, r.drug_2, r.description))
            .collect();
        let first_names = distinct_in_order(records.iter().map(|r| r.drug_a.as_str()));
        let second_names = distinct_in_order(records.iter().map(|r| r.drug_b.as_str()));
        let fingerprint = DatasetFingerprint::new(name, bytes, records.len());

        Ok(Self {
            records,
            first_names,
            second_names,
            fingerprint,
        })
    }

    /// All records in file order.
    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn first_drug_names(&self) -> &[String] {
        &self.first_names
    }

    pub fn second_drug_names(&self) -> &[String] {
        &self.second_names
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fingerprint(&self) -> &DatasetFingerprint {
        &self.fingerprint
    }

    /// First record, in file order, about any of the given pairs.
    pub fn find_any(&self, pairs: &[(&str, &str)]) -> Option<&InteractionRecord> {
        self.records
            .iter()
            .find(|r| pairs.iter().any(|(a, b)| r.involves(a, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = " Drug 1 ,Drug 2 , Interaction Description\n\
        Paracetamol,Ibuprofen,Kidney damage risk\n\
        Warfarin,Aspirin,Bleeding risk\n\
        Paracetamol,Ibuprofen,Duplicate row\n\
        Aspirin,Ibuprofen,Reduced cardioprotection\n";

    #[test]
    fn test_headers_trimmed() {
        let table = InteractionTable::from_bytes("t", CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.records()[1].description, "Bleeding risk");
    }

    #[test]
    fn test_reference_lists_distinct() {
        let table = InteractionTable::from_bytes("t", CSV.as_bytes()).unwrap();
        assert_eq!(table.first_drug_names(), &["Paracetamol", "Warfarin", "Aspirin"]);
        assert_eq!(table.second_drug_names(), &["Ibuprofen", "Aspirin"]);
    }

    #[test]
    fn test_find_either_order_first_row() {
        let table = InteractionTable::from_bytes("t", CSV.as_bytes()).unwrap();
        assert_eq!(
            table
                .find_any(&[("Ibuprofen", "Paracetamol")])
                .map(|r| r.description.as_str()),
            Some("Kidney damage risk")
        );
        assert_eq!(
            table
                .find_any(&[("Paracetamol", "Ibuprofen")])
                .map(|r| r.description.as_str()),
            Some("Kidney damage risk")
        );
        assert!(table.find_any(&[("Warfarin", "Ibuprofen")]).is_none());
        assert!(table.find_any(&[]).is_none());
    }

    #[test]
    fn test_find_any_uses_table_order() {
        let table = InteractionTable::from_bytes("t", CSV.as_bytes()).unwrap();
        let found = table
            .find_any(&[("Ibuprofen", "Aspirin"), ("Aspirin", "Warfarin")])
            .unwrap();
        assert_eq!(found.description, "Bleeding risk");
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let csv = "Drug 1,Interaction Description\nA,desc\n";
        let err = InteractionTable::from_bytes("bad.csv", csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { ref name, .. } if name == "bad.csv"));
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let csv = "Drug 1,Drug 2,Interaction Description\nA,B\n";
        let err = InteractionTable::from_bytes("bad.csv", csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { .. }));
    }

    #[test]
    fn test_empty_table_rejected() {
        let csv = "Drug 1,Drug 2,Interaction Description\n";
        let err = InteractionTable::from_bytes("empty.csv", csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty(_)));
    }
}
