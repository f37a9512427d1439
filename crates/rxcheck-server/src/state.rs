//! Shared handler state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rxcheck_core::Analyzer;
use rxcheck_llm::TextExtractor;

/// Everything a handler needs. Built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub ocr: Arc<dyn TextExtractor>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(analyzer: Analyzer, ocr: Arc<dyn TextExtractor>) -> Self {
        Self {
            analyzer,
            ocr,
            started_at: Utc::now(),
        }
    }
}
