//! `POST /analyze`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use rxcheck_core::AnalysisResult;
use serde::{Deserialize, Serialize};

use super::{request_span, run_blocking};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Comma-separated drug names
    pub input_text: String,
    /// Patient age in years
    pub age: i32,
}

/// `POST /analyze`: interactions, dosage and a generated summary for a drug list.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let span = request_span("analyze");
    span.in_scope(|| tracing::info!(age = request.age, "analysis requested"));

    let analyzer = state.analyzer.clone();
    let result = run_blocking(span, move || {
        Ok(analyzer.analyze(&request.input_text, request.age)?)
    })
    .await?;
    Ok(Json(result))
}
