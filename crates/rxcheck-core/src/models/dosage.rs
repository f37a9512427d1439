//! Age groups and dosage records.

use serde::{Deserialize, Serialize};

/// Coarse patient age bracket used to select a dosage row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    /// Up to and including 2 years
    Infant,
    /// Over 2, up to and including 12 years
    Child,
    /// 13 to 60 years inclusive
    Adult,
    /// Over 60 years
    Senior,
}

impl AgeGroup {
    /// All groups, in the order labels are checked.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Infant,
        AgeGroup::Child,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];

    /// Substring that marks this group in a dataset label.
    pub fn keyword(self) -> &'static str {
        match self {
            AgeGroup::Infant => "infant",
            AgeGroup::Child => "child",
            AgeGroup::Adult => "adult",
            AgeGroup::Senior => "senior",
        }
    }

    /// Check whether an age in years falls in this group.
    pub fn contains(self, age: i32) -> bool {
        match self {
            AgeGroup::Infant => age <= 2,
            AgeGroup::Child => age > 2 && age <= 12,
            AgeGroup::Adult => (13..=60).contains(&age),
            AgeGroup::Senior => age > 60,
        }
    }

    /// The group an age belongs to, if any.
    ///
    /// Ages between 12 and 13 cannot occur for whole years, so every integer
    /// age maps to exactly one group.
    pub fn for_age(age: i32) -> Option<AgeGroup> {
        Self::ALL.into_iter().find(|g| g.contains(age))
    }

    /// Groups named in a label, matched case-insensitively by substring.
    ///
    /// "Adults (13-60)" yields `[Adult]`; a label with no keyword yields nothing.
    pub fn in_label(label: &str) -> Vec<AgeGroup> {
        let lower = label.to_lowercase();
        Self::ALL
            .into_iter()
            .filter(|g| lower.contains(g.keyword()))
            .collect()
    }
}

/// Dosage guidance for one drug and one age group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DosageRecord {
    /// Drug name as written in the dosage table
    pub drug: String,
    /// Group that matched the patient's age
    pub age_group: AgeGroup,
    /// Raw age-group label from the table
    pub age_group_label: String,
    /// Dose (e.g. "500 mg")
    pub dosage: String,
    /// Frequency (e.g. "Every 6 hours")
    pub frequency: String,
}
