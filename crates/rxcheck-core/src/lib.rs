//! rxcheck Core Library
//!
//! Drug-interaction and age-based dosage checks for prescriptions.
//!
//! # Architecture
//!
//! ```text
//! "Paracetamol, Ibuprofen", age 30
//!               │
//!        parse_drug_list
//!               │
//!     ┌─────────┴──────────┐
//!     ▼                    ▼
//! Fuzzy match →       Dosage lookup
//! pairwise            (exact name,
//! interaction         age bracket)
//! lookup                   │
//!     │                    │
//!     └─────────┬──────────┘
//!               ▼
//!      Generation service ──▶ safety summary
//!               │
//!               ▼
//!         AnalysisResult
//! ```
//!
//! # Modules
//!
//! - [`dataset`]: CSV loading of the interaction and dosage tables
//! - [`models`]: Domain types (InteractionRecord, DosageRecord, AnalysisResult, ...)
//! - [`resolver`]: Fuzzy name matcher, interaction checker, dosage resolver
//! - [`analysis`]: Request-level `analyze` / `explain`

pub mod analysis;
pub mod dataset;
pub mod models;
pub mod resolver;

// Re-export commonly used types
pub use analysis::{parse_drug_list, AnalysisError, Analyzer};
pub use dataset::{DatasetError, DatasetFingerprint, Datasets, DosageTable, InteractionTable};
pub use models::{AgeGroup, AnalysisResult, DosageRecord, InteractionRecord, MatchResult};
pub use resolver::{NameMatcher, Resolver, DEFAULT_MATCH_THRESHOLD};
