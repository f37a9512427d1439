//! Dataset loading.
//!
//! Two CSV tables are read once at startup and never mutated afterwards:
//! drug-interaction pairs and dosage-by-age-group. Header whitespace is
//! trimmed so `" Drug 1 "` and `"Drug 1"` are the same column.

mod dosage;
mod interactions;

pub use dosage::*;
pub use interactions::*;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Dataset errors. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset {name}: {source}")]
    Malformed {
        name: String,
        #[source]
        source: csv::Error,
    },

    #[error("Dataset {0} has no rows")]
    Empty(String),
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Identity of a loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetFingerprint {
    /// Source name (file path or caller-supplied label)
    pub name: String,
    /// Hex SHA-256 of the raw bytes
    pub sha256: String,
    /// Number of data rows
    pub rows: usize,
}

impl DatasetFingerprint {
    fn new(name: &str, bytes: &[u8], rows: usize) -> Self {
        Self {
            name: name.to_string(),
            sha256: hex::encode(Sha256::digest(bytes)),
            rows,
        }
    }
}

/// Both lookup tables, loaded together.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub interactions: InteractionTable,
    pub dosage: DosageTable,
    known_names: Vec<String>,
    loaded_at: DateTime<Utc>,
}

impl Datasets {
    /// Assemble from already-parsed tables.
    pub fn new(interactions: InteractionTable, dosage: DosageTable) -> Self {
        let known_names = distinct_in_order(
            interactions
                .first_drug_names()
                .iter()
                .chain(interactions.second_drug_names())
                .chain(dosage.drug_names())
                .map(String::as_str),
        );
        Self {
            interactions,
            dosage,
            known_names,
            loaded_at: Utc::now(),
        }
    }

    /// Load both tables from disk.
    ///
    /// Both paths are checked before either is parsed, so a missing file is
    /// always reported as `NotFound`.
    pub fn load(interactions_path: &Path, dosage_path: &Path) -> DatasetResult<Self> {
        for path in [interactions_path, dosage_path] {
            if !path.is_file() {
                return Err(DatasetError::NotFound(path.to_path_buf()));
            }
        }

        let interactions = InteractionTable::from_bytes(
            &interactions_path.display().to_string(),
            &read_file(interactions_path)?,
        )?;
        let dosage =
            DosageTable::from_bytes(&dosage_path.display().to_string(), &read_file(dosage_path)?)?;

        let datasets = Self::new(interactions, dosage);
        for fp in datasets.fingerprints() {
            tracing::info!(dataset = %fp.name, rows = fp.rows, sha256 = %fp.sha256, "dataset loaded");
        }
        Ok(datasets)
    }

    /// Every distinct drug name in either table, first-seen order.
    pub fn known_names(&self) -> &[String] {
        &self.known_names
    }

    /// Fingerprints of the interaction and dosage tables, in that order.
    pub fn fingerprints(&self) -> [&DatasetFingerprint; 2] {
        [self.interactions.fingerprint(), self.dosage.fingerprint()]
    }

    /// When the tables were assembled.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn read_file(path: &Path) -> DatasetResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse every row of a CSV with trimmed headers.
pub(crate) fn parse_rows<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> DatasetResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| DatasetError::Malformed {
            name: name.to_string(),
            source,
        })
}

/// Distinct values, keeping the first occurrence of each.
pub(crate) fn distinct_in_order<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|n| seen.insert(*n))
        .map(str::to_string)
        .collect()
}
