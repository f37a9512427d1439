//! Prescription text extraction through a vision model.

use std::sync::Arc;

use base64::Engine as _;
use thiserror::Error;

use crate::client::{GenerationError, VisionClient};
use crate::prompts::{OCR_SYSTEM_PROMPT, OCR_USER_PROMPT};

/// OCR errors.
#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Image is empty")]
    EmptyImage,

    #[error("Vision model error: {0}")]
    Vision(#[from] GenerationError),
}

pub type OcrResult<T> = Result<T, OcrError>;

/// Best-effort text extraction from image bytes.
pub trait TextExtractor: Send + Sync {
    /// Extract text from an image. May return an empty string.
    fn extract_text(&self, image_bytes: &[u8]) -> OcrResult<String>;
}

/// OCR engine backed by a vision model on the generation service.
pub struct OllamaVisionOcr {
    vision_client: Arc<dyn VisionClient>,
    model_name: String,
}

impl OllamaVisionOcr {
    pub fn new(vision_client: Arc<dyn VisionClient>, model_name: impl Into<String>) -> Self {
        Self {
            vision_client,
            model_name: model_name.into(),
        }
    }
}

impl TextExtractor for OllamaVisionOcr {
    fn extract_text(&self, image_bytes: &[u8]) -> OcrResult<String> {
        if image_bytes.is_empty() {
            return Err(OcrError::EmptyImage);
        }

        let _span = tracing::info_span!(
            "vision_ocr",
            model = %self.model_name,
            image_size = image_bytes.len(),
        )
        .entered();

        let images = vec![base64::engine::general_purpose::STANDARD.encode(image_bytes)];
        let raw = self.vision_client.chat_with_images(
            &self.model_name,
            OCR_USER_PROMPT,
            &images,
            Some(OCR_SYSTEM_PROMPT),
        )?;

        let text = join_ocr_lines(&raw);
        if text.is_empty() {
            tracing::warn!("no text detected in image");
        } else {
            tracing::info!(text_len = text.len(), "extracted prescription text");
        }
        Ok(text)
    }
}

/// Flatten model output into one line of space-separated text.
///
/// Markdown code fences that some models wrap around transcriptions are dropped.
pub fn join_ocr_lines(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mock extractor for tests. Returns the same text for any non-empty image.
pub struct MockTextExtractor {
    text: String,
}

impl MockTextExtractor {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl TextExtractor for MockTextExtractor {
    fn extract_text(&self, image_bytes: &[u8]) -> OcrResult<String> {
        if image_bytes.is_empty() {
            return Err(OcrError::EmptyImage);
        }
        Ok(self.text.clone())
    }
}
