//! `GET /health`

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use rxcheck_core::DatasetFingerprint;
use serde::Serialize;

use crate::config::APP_VERSION;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub started_at: DateTime<Utc>,
    pub datasets_loaded_at: DateTime<Utc>,
    pub datasets: Vec<DatasetFingerprint>,
}

/// `GET /health`: liveness plus the identity of the loaded tables.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let datasets = state.analyzer.datasets();
    Json(HealthResponse {
        status: "ok",
        version: APP_VERSION,
        started_at: state.started_at,
        datasets_loaded_at: datasets.loaded_at(),
        datasets: datasets.fingerprints().into_iter().cloned().collect(),
    })
}
