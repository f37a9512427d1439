//! Generation service client.
//!
//! The service speaks the Ollama `/api/chat` protocol. Requests are blocking;
//! async callers should run them on a blocking thread.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prompts::{ChatTurn, Role};

/// Fixed seed so repeated summaries of the same drug list stay stable.
pub const GENERATION_SEED: u64 = 42;

/// Upper bound on generated tokens per reply.
pub const MAX_NEW_TOKENS: u32 = 512;

/// Generation errors.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Generation service is not reachable at {0}")]
    Connection(String),

    #[error("Generation request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Generation service returned error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Malformed generation response: {0}")]
    Response(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;

/// Anything that turns a conversation into a reply.
pub trait GenerationClient: Send + Sync {
    /// Generate a reply to the conversation.
    fn generate(&self, turns: &[ChatTurn]) -> GenerationResult<String>;
}

/// Vision-capable chat, used by the OCR engine.
pub trait VisionClient: Send + Sync {
    /// Send a prompt with base64-encoded images to a vision model.
    fn chat_with_images(
        &self,
        model: &str,
        prompt: &str,
        images: &[String],
        system: Option<&str>,
    ) -> GenerationResult<String>;
}

/// Ollama-compatible HTTP client.
pub struct OllamaClient {
    base_url: String,
    model: String,
    api_token: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a client for `model` served at `base_url`.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> GenerationResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_token: None,
            client,
            timeout_secs,
        })
    }

    /// Send `token` as a bearer credential on every request.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Model used for text generation.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat(&self, model: &str, messages: Vec<OllamaMessage<'_>>) -> GenerationResult<String> {
        let url = format!("{}/api/chat", self.base_url);
        let body = OllamaChatRequest {
            model,
            messages,
            stream: false,
            options: OllamaOptions {
                seed: GENERATION_SEED,
                num_predict: MAX_NEW_TOKENS,
            },
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let start = std::time::Instant::now();
        let response = request.send().map_err(|e| {
            if e.is_connect() {
                GenerationError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                GenerationError::Timeout(self.timeout_secs)
            } else {
                GenerationError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaChatResponse = response
            .json()
            .map_err(|e| GenerationError::Response(e.to_string()))?;

        tracing::debug!(
            model,
            elapsed_ms = %start.elapsed().as_millis(),
            reply_len = parsed.message.content.len(),
            "generation complete"
        );

        Ok(parsed.message.content)
    }
}

/// Request body for `/api/chat`.
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaMessage<'a> {
    role: Role,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<&'a [String]>,
}

#[derive(Serialize)]
struct OllamaOptions {
    seed: u64,
    num_predict: u32,
}

/// Response body from `/api/chat`.
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaReply,
}

#[derive(Deserialize)]
struct OllamaReply {
    content: String,
}

impl GenerationClient for OllamaClient {
    fn generate(&self, turns: &[ChatTurn]) -> GenerationResult<String> {
        let messages = turns
            .iter()
            .map(|t| OllamaMessage {
                role: t.role,
                content: &t.content,
                images: None,
            })
            .collect();
        self.chat(&self.model, messages)
    }
}

impl VisionClient for OllamaClient {
    fn chat_with_images(
        &self,
        model: &str,
        prompt: &str,
        images: &[String],
        system: Option<&str>,
    ) -> GenerationResult<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(OllamaMessage {
                role: Role::System,
                content: system,
                images: None,
            });
        }
        messages.push(OllamaMessage {
            role: Role::User,
            content: prompt,
            images: Some(images),
        });
        self.chat(model, messages)
    }
}

/// Mock generation client for tests. Returns a fixed reply or a fixed failure.
pub struct MockGenerationClient {
    reply: Result<String, String>,
    seen: Mutex<Vec<Vec<ChatTurn>>>,
}

impl MockGenerationClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails as if the service were unreachable.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Conversations received so far.
    pub fn conversations(&self) -> Vec<Vec<ChatTurn>> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl GenerationClient for MockGenerationClient {
    fn generate(&self, turns: &[ChatTurn]) -> GenerationResult<String> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(turns.to_vec());
        }
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(GenerationError::Connection(message.clone())),
        }
    }
}

impl VisionClient for MockGenerationClient {
    fn chat_with_images(
        &self,
        _model: &str,
        prompt: &str,
        _images: &[String],
        system: Option<&str>,
    ) -> GenerationResult<String> {
        let mut turns = Vec::new();
        if let Some(system) = system {
            turns.push(ChatTurn::system(system));
        }
        turns.push(ChatTurn::user(prompt));
        self.generate(&turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let images = vec!["aGVsbG8=".to_string()];
        let body = OllamaChatRequest {
            model: "granite3.3:2b",
            messages: vec![
                OllamaMessage {
                    role: Role::User,
                    content: "hi",
                    images: None,
                },
                OllamaMessage {
                    role: Role::User,
                    content: "read",
                    images: Some(&images),
                },
            ],
            stream: false,
            options: OllamaOptions {
                seed: GENERATION_SEED,
                num_predict: MAX_NEW_TOKENS,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "granite3.3:2b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["seed"], 42);
        assert_eq!(json["options"]["num_predict"], 512);
        assert!(json["messages"][0].get("images").is_none());
        assert_eq!(json["messages"][1]["images"][0], "aGVsbG8=");
    }

    #[test]
    fn test_chat_response_parse() {
        let json = r#"{"model":"m","message":{"role":"assistant","content":"Take with food."},"done":true}"#;
        let parsed: OllamaChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.message.content, "Take with food.");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/", "m", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.model(), "m");
    }

    #[test]
    fn test_unusable_base_url_fails_before_sending() {
        let client = OllamaClient::new("not a url", "m", 2).unwrap();
        let err = client.generate(&[ChatTurn::user("hi")]).unwrap_err();
        assert!(matches!(err, GenerationError::Http(_)), "got {:?}", err);
    }

    #[test]
    fn test_mock_records_conversations() {
        let mock = MockGenerationClient::new("ok");
        let reply = mock.generate(&[ChatTurn::user("first")]).unwrap();
        assert_eq!(reply, "ok");
        mock.generate(&[ChatTurn::user("second")]).unwrap();

        let seen = mock.conversations();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1][0].content, "second");
    }

    #[test]
    fn test_failing_mock() {
        let mock = MockGenerationClient::failing("down");
        let err = mock.generate(&[ChatTurn::user("x")]).unwrap_err();
        assert_eq!(err.to_string(), "Generation service is not reachable at down");
    }
}
