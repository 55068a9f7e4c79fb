//! AI provider abstractions and implementations.
//!
//! The `/bfhl` AI operation goes through [`TextProvider`] so the Gemini
//! backend can be swapped for a mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Label used for the provider error metric.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Network(_) => "network",
            ProviderError::Api { .. } => "api",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Trait for single-prompt text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a reply to `prompt`, returning the text of the first
    /// candidate's first content part.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Provider name for metrics and logs.
    fn name(&self) -> &'static str;

    /// Model identifier for metrics and logs.
    fn model(&self) -> &str;
}

/// First whitespace-delimited token of `text`, or `""` when there is none.
pub fn first_word(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}
