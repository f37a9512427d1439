//! Age-based dosage lookup.

use crate::dataset::DosageTable;
use crate::models::{AgeGroup, DosageRecord};

/// Resolves dosage guidance for a drug and a patient age.
pub struct DosageResolver<'a> {
    table: &'a DosageTable,
}

impl<'a> DosageResolver<'a> {
    pub fn new(table: &'a DosageTable) -> Self {
        Self { table }
    }

    /// First row, in table order, whose drug equals `drug` (case-insensitive,
    /// not fuzzy) and whose age-group label names the group `age` falls in.
    ///
    /// Rows whose label names no known age group are skipped.
    pub fn resolve(&self, drug: &str, age: i32) -> Option<DosageRecord> {
        let group = AgeGroup::for_age(age)?;
        let wanted = drug.to_lowercase();
        self.table
            .entries()
            .iter()
            .find(|entry| entry.covers(group) && entry.drug.to_lowercase() == wanted)
            .map(|entry| DosageRecord {
                drug: entry.drug.clone(),
                age_group: group,
                age_group_label: entry.age_group_label.clone(),
                dosage: entry.dosage.clone(),
                frequency: entry.frequency.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Drug,Age Group,Dosage,Frequency\n\
        Paracetamol,Infant (0-2),10-15 mg/kg,Every 6 hours\n\
        Paracetamol,Child (3-12),250 mg,Every 6 hours\n\
        Paracetamol,Adult (13-60),500 mg,Every 6 hours\n\
        Paracetamol,Senior (60+),500 mg,Every 8 hours\n\
        Paracetamol,Adult,1000 mg,Every 8 hours\n\
        Ibuprofen,Teenager,200 mg,Every 8 hours\n";

    fn table() -> DosageTable {
        DosageTable::from_bytes("test", CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_age_boundaries_select_one_group() {
        let table = table();
        let resolver = DosageResolver::new(&table);

        let cases = [
            (2, AgeGroup::Infant),
            (3, AgeGroup::Child),
            (12, AgeGroup::Child),
            (13, AgeGroup::Adult),
            (60, AgeGroup::Adult),
            (61, AgeGroup::Senior),
        ];
        for (age, expected) in cases {
            let record = resolver.resolve("Paracetamol", age).unwrap();
            assert_eq!(record.age_group, expected, "age {}", age);
        }
    }

    #[test]
    fn test_first_matching_row_wins() {
        let table = table();
        let resolver = DosageResolver::new(&table);

        let record = resolver.resolve("Paracetamol", 30).unwrap();
        assert_eq!(record.dosage, "500 mg");
        assert_eq!(record.frequency, "Every 6 hours");
        assert_eq!(record.age_group_label, "Adult (13-60)");
    }

    #[test]
    fn test_case_insensitive_exact_name() {
        let table = table();
        let resolver = DosageResolver::new(&table);

        assert!(resolver.resolve("PARACETAMOL", 30).is_some());
        assert!(resolver.resolve("paracetamol", 30).is_some());
        // Dosage lookup is exact, typos do not match.
        assert!(resolver.resolve("Paracetmol", 30).is_none());
    }

    #[test]
    fn test_unrecognized_label_never_selected() {
        let table = table();
        let resolver = DosageResolver::new(&table);

        for age in [0, 5, 15, 30, 70] {
            assert!(resolver.resolve("Ibuprofen", age).is_none());
        }
    }

    #[test]
    fn test_out_of_range_age_accepted() {
        let table = table();
        let resolver = DosageResolver::new(&table);

        assert_eq!(
            resolver.resolve("Paracetamol", 150).map(|r| r.age_group),
            Some(AgeGroup::Senior)
        );
        assert_eq!(
            resolver.resolve("Paracetamol", -1).map(|r| r.age_group),
            Some(AgeGroup::Infant)
        );
    }

    #[test]
    fn test_unknown_drug() {
        let table = table();
        let resolver = DosageResolver::new(&table);
        assert!(resolver.resolve("Xyzdrug123", 5).is_none());
    }
}
