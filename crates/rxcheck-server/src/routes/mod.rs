//! HTTP router.
//!
//! ```text
//! POST /analyze   {"input_text", "age"}  → AnalysisResult
//! POST /explain   {"prompt"}             → {"response"}
//! POST /ocr       multipart `image`      → {"text"}
//! GET  /health                           → status + dataset fingerprints
//! ```
//!
//! Analysis, generation and OCR block on HTTP calls to the generation
//! service, so handlers run them on the blocking pool inside a span that
//! carries a per-request id.

mod analyze;
mod explain;
mod health;
mod ocr;

pub use analyze::AnalyzeRequest;
pub use explain::{ExplainRequest, ExplainResponse};
pub use health::HealthResponse;
pub use ocr::OcrResponse;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tracing::Span;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Largest accepted prescription image upload.
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze::analyze))
        .route("/explain", post(explain::explain))
        .route(
            "/ocr",
            post(ocr::extract).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
        .route("/health", get(health::check))
        .with_state(state)
}

fn request_span(route: &'static str) -> Span {
    tracing::info_span!("request", route, request_id = %Uuid::new_v4())
}

/// Run blocking work on the blocking pool inside `span`.
async fn run_blocking<T, F>(span: Span, work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || span.in_scope(work)).await?
}
