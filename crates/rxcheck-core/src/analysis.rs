//! Prescription analysis: the request-level entry points.

use std::collections::BTreeMap;
use std::sync::Arc;

use rxcheck_llm::{question_conversation, summary_conversation, GenerationClient, GenerationError};
use thiserror::Error;

use crate::dataset::Datasets;
use crate::models::{AnalysisResult, MatchResult};
use crate::resolver::{NameMatcher, Resolver};

/// Analysis errors. Unmatched drug names are not errors.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Summary generation failed: {0}")]
    Generation(#[from] GenerationError),
}

pub type AnalysisOutcome<T> = Result<T, AnalysisError>;

/// Split comma-separated drug names, trimming each and dropping empties.
pub fn parse_drug_list(input_text: &str) -> Vec<String> {
    input_text
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shared, read-only analysis context.
///
/// Built once at startup; cheap to clone.
#[derive(Clone)]
pub struct Analyzer {
    datasets: Arc<Datasets>,
    generator: Arc<dyn GenerationClient>,
    matcher: NameMatcher,
}

impl Analyzer {
    pub fn new(datasets: Arc<Datasets>, generator: Arc<dyn GenerationClient>) -> Self {
        Self {
            datasets,
            generator,
            matcher: NameMatcher::new(),
        }
    }

    /// Use a custom fuzzy-match threshold.
    pub fn with_matcher(mut self, matcher: NameMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::with_matcher(&self.datasets, self.matcher)
    }

    /// Analyze a comma-separated drug list for a patient of `age` years.
    ///
    /// All or nothing: if the summary cannot be generated, no result is returned.
    pub fn analyze(&self, input_text: &str, age: i32) -> AnalysisOutcome<AnalysisResult> {
        let drugs = parse_drug_list(input_text);
        if drugs.is_empty() {
            return Err(AnalysisError::InvalidInput("No valid drugs found.".into()));
        }

        let resolver = self.resolver();
        let interactions = resolver.interactions(&drugs);
        let dosage_info: BTreeMap<_, _> = drugs
            .iter()
            .map(|d| (d.clone(), resolver.dosage(d, age)))
            .collect();
        let matches: Vec<MatchResult> = drugs.iter().map(|d| resolver.match_drug(d)).collect();

        tracing::info!(
            drugs = drugs.len(),
            matched = matches.iter().filter(|m| m.is_match()).count(),
            interactions = interactions.len(),
            age,
            "prescription analyzed"
        );

        let summary = self.generator.generate(&summary_conversation(&drugs))?;

        Ok(AnalysisResult {
            input_drugs: drugs,
            interactions,
            dosage_info,
            matches,
            summary,
        })
    }

    /// Ask the generation service a free-text question. The prompt is sent unmodified.
    pub fn explain(&self, prompt: &str) -> AnalysisOutcome<String> {
        if prompt.trim().is_empty() {
            return Err(AnalysisError::InvalidInput("Prompt is empty.".into()));
        }
        Ok(self.generator.generate(&question_conversation(prompt))?)
    }

    /// Best match for a single raw drug name among all known drugs.
    pub fn match_drug(&self, raw: &str) -> MatchResult {
        self.resolver().match_drug(raw)
    }
}
