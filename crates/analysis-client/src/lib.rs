//! Completion providers for lease analysis
//!
//! One request per analysis: the prompt goes out, the raw
//! completion text comes back. No retries and no caching happen here; a
//! failed call surfaces to the caller as an `AnalysisError`.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use mock::MockProvider;
pub use openai::{OpenAiConfig, OpenAiProvider, DEFAULT_ENDPOINT};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The provider asked us to slow down (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimited,

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Provider configuration error: {0}")]
    Configuration(String),
}

/// Any other failure of the remote call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Provider rejected credentials: {0}")]
    Authentication(String),

    #[error("Provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request to provider timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    MalformedResponse(String),
}

/// Sampling settings sent with every request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.2,
            max_tokens: 800,
        }
    }
}

/// A backend that turns a prompt into completion text
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError>;

    /// Short name for logs
    fn name(&self) -> &str;
}
