//! `POST /explain`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{request_span, run_blocking};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub response: String,
}

/// `POST /explain`: forward a free-text question to the generation service.
pub async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let analyzer = state.analyzer.clone();
    let response = run_blocking(request_span("explain"), move || {
        Ok(analyzer.explain(&request.prompt)?)
    })
    .await?;
    Ok(Json(ExplainResponse { response }))
}
