//! Drug interaction models.

use serde::{Deserialize, Serialize};

/// A known interaction between two drugs.
///
/// The pair is unordered: (A, B) and (B, A) describe the same interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionRecord {
    #[serde(rename = "drug1")]
    pub drug_a: String,
    #[serde(rename = "drug2")]
    pub drug_b: String,
    #[serde(rename = "interaction")]
    pub description: String,
}

impl InteractionRecord {
    pub fn new(drug_a: impl Into<String>, drug_b: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            drug_a: drug_a.into(),
            drug_b: drug_b.into(),
            description: description.into(),
        }
    }

    /// Check whether this record is about the pair {a, b}, in either order.
    ///
    /// Names are compared exactly; callers normalize first.
    pub fn involves(&self, a: &str, b: &str) -> bool {
        (self.drug_a == a && self.drug_b == b) || (self.drug_a == b && self.drug_b == a)
    }
}
