//! Dosage-by-age table.

use serde::Deserialize;

use super::{distinct_in_order, parse_rows, DatasetFingerprint, DatasetResult};
use crate::models::AgeGroup;

#[derive(Deserialize)]
struct DosageRow {
    #[serde(rename = "Drug")]
    drug: String,
    #[serde(rename = "Age Group")]
    age_group: String,
    #[serde(rename = "Dosage")]
    dosage: String,
    #[serde(rename = "Frequency")]
    frequency: String,
}

/// One row of the dosage table.
#[derive(Debug, Clone, PartialEq)]
pub struct DosageEntry {
    pub drug: String,
    pub age_group_label: String,
    /// Groups recognized in the label; empty if none
    pub age_groups: Vec<AgeGroup>,
    pub dosage: String,
    pub frequency: String,
}

impl DosageEntry {
    /// Whether this row's label names `group`.
    pub fn covers(&self, group: AgeGroup) -> bool {
        self.age_groups.contains(&group)
    }
}

/// Dosage rows in file order.
#[derive(Debug, Clone)]
pub struct DosageTable {
    entries: Vec<DosageEntry>,
    drug_names: Vec<String>,
    fingerprint: DatasetFingerprint,
}

impl DosageTable {
    /// Parse a CSV with columns `Drug, Age Group, Dosage, Frequency`.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> DatasetResult<Self> {
        let rows: Vec<DosageRow> = parse_rows(name, bytes)?;

        let entries: Vec<DosageEntry> = rows
            .into_iter()
            .map(|r| DosageEntry {
                age_groups: AgeGroup::in_label(&r.age_group),
                drug: r.drug,
                age_group_label: r.age_group,
                dosage: r.dosage,
                frequency: r.frequency,
            })
            .collect();

        let unrecognized = entries.iter().filter(|e| e.age_groups.is_empty()).count();
        if unrecognized > 0 {
            tracing::warn!(
                dataset = name,
                rows = unrecognized,
                "dosage rows with no recognized age group will never be selected"
            );
        }

        let drug_names = distinct_in_order(entries.iter().map(|e| e.drug.as_str()));
        let fingerprint = DatasetFingerprint::new(name, bytes, entries.len());

        Ok(Self {
            entries,
            drug_names,
            fingerprint,
        })
    }

    pub fn entries(&self) -> &[DosageEntry] {
        &self.entries
    }

    /// Distinct drug names, first-seen order.
    pub fn drug_names(&self) -> &[String] {
        &self.drug_names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fingerprint(&self) -> &DatasetFingerprint {
        &self.fingerprint
    }
}
