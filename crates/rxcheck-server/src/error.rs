//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rxcheck_core::AnalysisError;
use rxcheck_llm::OcrError;
use serde::Serialize;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Generation failed: {0}")]
    Generation(String),
    #[error("OCR failed: {0}")]
    Ocr(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InvalidInput(detail) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", detail),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail),
            ApiError::Generation(detail) => {
                tracing::warn!(detail = %detail, "generation service failed");
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", detail)
            }
            ApiError::Ocr(detail) => {
                tracing::warn!(detail = %detail, "OCR failed");
                (StatusCode::BAD_GATEWAY, "OCR_FAILED", detail)
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            AnalysisError::Generation(e) => ApiError::Generation(e.to_string()),
        }
    }
}

impl From<OcrError> for ApiError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::EmptyImage => ApiError::BadRequest("Image is empty".into()),
            OcrError::Vision(e) => ApiError::Ocr(e.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use rxcheck_llm::GenerationError;

    async fn json_of(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn invalid_input_returns_400() {
        let err: ApiError = AnalysisError::InvalidInput("No valid drugs found.".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
        assert_eq!(json["error"]["message"], "No valid drugs found.");
    }

    #[tokio::test]
    async fn generation_failure_returns_502_with_cause() {
        let err: ApiError = AnalysisError::Generation(GenerationError::Timeout(300)).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "GENERATION_FAILED");
        assert!(json["error"]["message"].as_str().unwrap().contains("300"));
    }

    #[tokio::test]
    async fn ocr_errors_map_by_cause() {
        let response = ApiError::from(OcrError::EmptyImage).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let vision = OcrError::Vision(GenerationError::Connection("refused".into()));
        let response = ApiError::from(vision).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_of(response).await["error"]["code"], "OCR_FAILED");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::Internal("task panicked: secret".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "INTERNAL");
        assert!(!json["error"]["message"].as_str().unwrap().contains("secret"));
    }
}
