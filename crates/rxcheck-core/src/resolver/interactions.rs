//! Pairwise interaction lookup.

use crate::dataset::InteractionTable;
use crate::models::InteractionRecord;

use super::NameMatcher;

/// Finds known interactions among a list of raw drug names.
pub struct InteractionChecker<'a> {
    table: &'a InteractionTable,
    matcher: NameMatcher,
}

impl<'a> InteractionChecker<'a> {
    pub fn new(table: &'a InteractionTable, matcher: NameMatcher) -> Self {
        Self { table, matcher }
    }

    /// Check every unordered pair `i < j` of `drugs`.
    ///
    /// Drug i is matched against the `Drug 1` names and drug j against the
    /// `Drug 2` names. The reversed orientation is tried as well, so a drug
    /// listed only in one column is found whichever position it was typed in.
    /// The first table row, in file order, about either orientation wins.
    /// The forward orientation gets no priority: swapping i and j swaps the
    /// two orientations, so only a rule that treats them alike returns the
    /// same row for `[A, B]` and `[B, A]` when each reading matches a
    /// different row. Results come back in pair order (i ascending, then j),
    /// at most one per pair, reported as (match of i, match of j).
    pub fn check(&self, drugs: &[String]) -> Vec<InteractionRecord> {
        let as_first: Vec<Option<&str>> = drugs
            .iter()
            .map(|d| self.matcher.match_name(d, self.table.first_drug_names()))
            .collect();
        let as_second: Vec<Option<&str>> = drugs
            .iter()
            .map(|d| self.matcher.match_name(d, self.table.second_drug_names()))
            .collect();

        let mut found = Vec::new();
        for i in 0..drugs.len() {
            for j in (i + 1)..drugs.len() {
                let orientations: Vec<(&str, &str)> = [
                    (as_first[i], as_second[j]),
                    (as_second[i], as_first[j]),
                ]
                .into_iter()
                .filter_map(|pair| match pair {
                    (Some(a), Some(b)) => Some((a, b)),
                    _ => None,
                })
                .collect();

                if orientations.is_empty() {
                    continue;
                }

                let Some(record) = self.table.find_any(&orientations) else {
                    continue;
                };
                let Some(&(name_i, name_j)) =
                    orientations.iter().find(|(a, b)| record.involves(a, b))
                else {
                    continue;
                };

                tracing::debug!(
                    drug_a = %drugs[i],
                    drug_b = %drugs[j],
                    matched_a = name_i,
                    matched_b = name_j,
                    "interaction found"
                );
                found.push(InteractionRecord::new(name_i, name_j, record.description.clone()));
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Drug 1,Drug 2,Interaction Description\n\
        Paracetamol,Ibuprofen,Kidney damage risk\n\
        Warfarin,Aspirin,Increased bleeding risk\n\
        Sildenafil,Nitroglycerin,Severe hypotension\n\
        Warfarin,Ibuprofen,GI bleeding risk\n";

    fn table() -> InteractionTable {
        InteractionTable::from_bytes("test", CSV.as_bytes()).unwrap()
    }

    fn drugs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_pair() {
        let table = table();
        let checker = InteractionChecker::new(&table, NameMatcher::new());

        let found = checker.check(&drugs(&["Paracetamol", "Ibuprofen"]));
        assert_eq!(
            found,
            vec![InteractionRecord::new("Paracetamol", "Ibuprofen", "Kidney damage risk")]
        );
    }

    #[test]
    fn test_reversed_input_finds_same_description() {
        let table = table();
        let checker = InteractionChecker::new(&table, NameMatcher::new());

        // Ibuprofen only appears in the Drug 2 column.
        let found = checker.check(&drugs(&["Ibuprofen", "Paracetamol"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Kidney damage risk");
        assert_eq!(found[0].drug_a, "Ibuprofen");
        assert_eq!(found[0].drug_b, "Paracetamol");
    }

    #[test]
    fn test_misspelled_and_lowercase_names() {
        let table = table();
        let checker = InteractionChecker::new(&table, NameMatcher::new());

        let found = checker.check(&drugs(&["warfarn", "ASPIRIN"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].drug_a, "Warfarin");
        assert_eq!(found[0].drug_b, "Aspirin");
    }

    #[test]
    fn test_pair_order_preserved() {
        let table = table();
        let checker = InteractionChecker::new(&table, NameMatcher::new());

        let found = checker.check(&drugs(&["Warfarin", "Paracetamol", "Ibuprofen", "Aspirin"]));
        let descriptions: Vec<&str> = found.iter().map(|r| r.description.as_str()).collect();
        // (0,2) Warfarin-Ibuprofen, (0,3) Warfarin-Aspirin, (1,2) Paracetamol-Ibuprofen
        assert_eq!(
            descriptions,
            vec!["GI bleeding risk", "Increased bleeding risk", "Kidney damage risk"]
        );
    }

    #[test]
    fn test_unknown_drug_contributes_nothing() {
        let table = table();
        let checker = InteractionChecker::new(&table, NameMatcher::new());

        assert!(checker.check(&drugs(&["Xyzdrug123", "Ibuprofen"])).is_empty());
        assert!(checker.check(&drugs(&["Xyzdrug123"])).is_empty());
        assert!(checker.check(&[]).is_empty());
    }

    #[test]
    fn test_known_drugs_without_row() {
        let table = table();
        let checker = InteractionChecker::new(&table, NameMatcher::new());
        assert!(checker.check(&drugs(&["Sildenafil", "Aspirin"])).is_empty());
    }

    #[test]
    fn test_no_self_pairs() {
        let table = table();
        let checker = InteractionChecker::new(&table, NameMatcher::new());
        assert!(checker.check(&drugs(&["Warfarin"])).is_empty());
    }

    #[test]
    fn test_duplicate_input_checked_by_position() {
        let table = table();
        let checker = InteractionChecker::new(&table, NameMatcher::new());

        let found = checker.check(&drugs(&["Paracetamol", "Ibuprofen", "Paracetamol"]));
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|r| r.description == "Kidney damage risk"));
    }

    #[test]
    fn test_distinct_rows_per_orientation_independent_of_input_order() {
        // Each reading of the pair resolves to a different spelling and row.
        let csv = "Drug 1,Drug 2,Interaction Description\n\
            Tramadol,Fluoxetin,Listed first\n\
            Fluoxetine,Tramadole,Listed second\n";
        let table = InteractionTable::from_bytes("test", csv.as_bytes()).unwrap();
        let checker = InteractionChecker::new(&table, NameMatcher::new());

        let forward = checker.check(&drugs(&["Fluoxetine", "Tramadol"]));
        assert_eq!(
            forward,
            vec![InteractionRecord::new("Fluoxetin", "Tramadol", "Listed first")]
        );

        let reversed = checker.check(&drugs(&["Tramadol", "Fluoxetine"]));
        assert_eq!(
            reversed,
            vec![InteractionRecord::new("Tramadol", "Fluoxetin", "Listed first")]
        );
    }
}
