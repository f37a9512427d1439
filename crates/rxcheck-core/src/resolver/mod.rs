//! Drug-name resolution against the loaded datasets.
//!
//! Pipeline: fuzzy name match → pairwise interaction lookup → dosage lookup

mod dosage;
mod interactions;
mod matcher;

pub use dosage::*;
pub use interactions::*;
pub use matcher::*;

use crate::dataset::Datasets;
use crate::models::{DosageRecord, InteractionRecord, MatchResult};

/// Resolver over a borrowed set of tables.
pub struct Resolver<'a> {
    datasets: &'a Datasets,
    matcher: NameMatcher,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with the default match threshold.
    pub fn new(datasets: &'a Datasets) -> Self {
        Self::with_matcher(datasets, NameMatcher::new())
    }

    pub fn with_matcher(datasets: &'a Datasets, matcher: NameMatcher) -> Self {
        Self { datasets, matcher }
    }

    /// Known interactions among `drugs`.
    pub fn interactions(&self, drugs: &[String]) -> Vec<InteractionRecord> {
        InteractionChecker::new(&self.datasets.interactions, self.matcher).check(drugs)
    }

    /// Dosage guidance for one drug at a given age.
    pub fn dosage(&self, drug: &str, age: i32) -> Option<DosageRecord> {
        DosageResolver::new(&self.datasets.dosage).resolve(drug, age)
    }

    /// Best match for `raw` among every drug named in either table.
    pub fn match_drug(&self, raw: &str) -> MatchResult {
        self.matcher.best_match(raw, self.datasets.known_names())
    }
}
