//! Clients for the external services used by rxcheck.
//!
//! This crate talks to an Ollama-compatible server for two things: the
//! free-text safety summary (and ad hoc questions), and vision OCR of
//! prescription images. Both are reached through small traits so the core
//! and the tests can substitute mocks.

pub mod client;
pub mod ocr;
pub mod prompts;

pub use client::*;
pub use ocr::*;
pub use prompts::*;
