//! Prompts for the safety summary, free-text questions and prescription OCR.

use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn in a chat conversation sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// User prompt asking for an interaction and safety summary of a drug list.
pub fn make_summary_prompt(drugs: &[String]) -> String {
    format!(
        "Analyze the interactions and safety of these drugs: {}. \
         Provide a short, clear medical summary with any warnings.",
        drugs.join(", ")
    )
}

/// Conversation for the safety summary: a single user turn.
pub fn summary_conversation(drugs: &[String]) -> Vec<ChatTurn> {
    vec![ChatTurn::user(make_summary_prompt(drugs))]
}

/// Conversation for a free-text question. The prompt is passed unmodified.
pub fn question_conversation(prompt: &str) -> Vec<ChatTurn> {
    vec![ChatTurn::user(prompt)]
}

/// System prompt for vision models reading prescription images.
pub const OCR_SYSTEM_PROMPT: &str = "\
You are a text extractor for handwritten and printed medical prescriptions. \
Transcribe the visible text exactly as written. Do not explain, translate or add anything.";

/// User instruction sent alongside the prescription image.
pub const OCR_USER_PROMPT: &str = "\
Extract all visible text from this prescription image. \
Write one line of output per line of text in the image.";
