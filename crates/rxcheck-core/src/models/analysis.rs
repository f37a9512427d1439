//! Per-request match and analysis results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DosageRecord, InteractionRecord};

/// Outcome of fuzzy-matching one raw drug name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    /// Name as supplied by the caller
    pub input: String,
    /// Canonical name, if the best score reached the threshold
    pub matched_name: Option<String>,
    /// Best similarity score seen (0 - 100), whether or not it was accepted
    pub confidence: u8,
}

impl MatchResult {
    /// Result for an input that matched nothing.
    pub fn unmatched(input: &str) -> Self {
        Self {
            input: input.to_string(),
            matched_name: None,
            confidence: 0,
        }
    }

    /// Check if the input was accepted as a known drug.
    pub fn is_match(&self) -> bool {
        self.matched_name.is_some()
    }
}

/// Full result of analyzing a prescription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// Drugs in input order, exactly as typed (after trimming)
    pub input_drugs: Vec<String>,
    /// Interactions found, in pair-examination order
    pub interactions: Vec<InteractionRecord>,
    /// Dosage guidance keyed by input drug; `None` when no row applies
    pub dosage_info: BTreeMap<String, Option<DosageRecord>>,
    /// Fuzzy-match outcome per input drug, in input order
    pub matches: Vec<MatchResult>,
    /// Generated safety summary
    pub summary: String,
}
