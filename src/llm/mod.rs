//! The completion capability: an opaque text-generation service.
//!
//! The pipeline never talks to a concrete API directly — it goes through
//! [`CompletionProvider`], a one-method trait. That keeps the orchestrators
//! testable with a canned in-memory provider and leaves room for other
//! backends without touching any branching logic.

use async_trait::async_trait;
use thiserror::Error;

pub mod openai;

pub use openai::OpenAiProvider;

/// A single chat-completion request.
///
/// The contract is deliberately small: one system instruction, one user
/// prompt, sampling temperature, and an optional output-length cap. No
/// conversation history — every pipeline call is one-shot.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// Trait for completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Issue one completion request and return the generated text.
    ///
    /// No retry is attempted at this layer or above; failures surface to the
    /// caller with the backend's message intact.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

/// Failures from a completion backend.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} — {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
}
