//! Language-model gateway.
//!
//! Single abstraction point for all text-completion calls: prompt in,
//! text out. Every call is single-turn; the caller supplies all context
//! in the prompt, there is no server-side conversation state.

pub mod groq;
pub mod parse;

use async_trait::async_trait;

pub use groq::GroqClient;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("No API key configured for the language model")]
    MissingCredential,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Response contained no completion")]
    EmptyCompletion,

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Per-call options. The default is a plain user prompt at the client's
/// configured temperature.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// System prompt prepended to the conversation
    pub system: Option<String>,
    /// Sampling temperature override for this call
    pub temperature: Option<f32>,
}

impl ChatOptions {
    pub fn with_system(system: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            temperature: None,
        }
    }
}

/// A remote text-completion backend.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send one prompt and return the completion text, trimmed.
    async fn chat(&self, prompt: &str, options: ChatOptions) -> Result<String, GatewayError>;
}
