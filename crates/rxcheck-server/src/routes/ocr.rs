//! `POST /ocr`

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{request_span, run_blocking};
use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field holding the prescription image.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize, Deserialize)]
pub struct OcrResponse {
    pub text: String,
}

/// `POST /ocr`: extract prescription text from an uploaded image.
pub async fn extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OcrResponse>, ApiError> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        image = Some(bytes.to_vec());
        break;
    }

    let image = image.ok_or_else(|| {
        ApiError::BadRequest(format!("Missing multipart field `{IMAGE_FIELD}`"))
    })?;

    let span = request_span("ocr");
    span.in_scope(|| tracing::info!(image_size = image.len(), "OCR requested"));

    let ocr = state.ocr.clone();
    let text = run_blocking(span, move || Ok(ocr.extract_text(&image)?)).await?;
    Ok(Json(OcrResponse { text }))
}
