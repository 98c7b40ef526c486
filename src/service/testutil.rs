//! Shared doubles for service tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::llm::{ChatGateway, ChatOptions, GatewayError};

/// Scripted [`ChatGateway`] that records every prompt it receives.
///
/// Keyed replies are matched first by substring, then queued replies are
/// popped in order, then the default reply applies.
pub(crate) struct StubGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    keyed: Vec<(String, String)>,
    default_reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGateway {
    pub(crate) fn with_replies(replies: &[&str]) -> Self {
        Self::with_results(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub(crate) fn with_results(results: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(results.into()),
            keyed: Vec::new(),
            default_reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answer every prompt with the same reply.
    pub(crate) fn always(reply: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            keyed: Vec::new(),
            default_reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply based on a substring of the prompt, regardless of call order.
    pub(crate) fn keyed(pairs: &[(&str, &str)]) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            keyed: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            default_reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with an API error.
    pub(crate) fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            keyed: Vec::new(),
            default_reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatGateway for StubGateway {
    async fn chat(&self, prompt: &str, _options: ChatOptions) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        for (needle, reply) in &self.keyed {
            if prompt.contains(needle) {
                return Ok(reply.clone());
            }
        }
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        match &self.default_reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(GatewayError::ApiError {
                status: 500,
                message: "stubbed failure".to_string(),
            }),
        }
    }
}

/// Deterministic in-process embedder.
///
/// Texts without an override embed to an 8-dimensional vector derived from
/// their bytes, so equal texts always embed equally.
pub(crate) struct StaticEmbedder {
    overrides: Vec<(String, Vec<f32>)>,
    fail: bool,
}

impl StaticEmbedder {
    pub(crate) fn new() -> Self {
        Self {
            overrides: Vec::new(),
            fail: false,
        }
    }

    pub(crate) fn with_overrides(pairs: &[(&str, &[f32])]) -> Self {
        Self {
            overrides: pairs
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.to_vec()))
                .collect(),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            overrides: Vec::new(),
            fail: true,
        }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        for (needle, vector) in &self.overrides {
            if text == needle {
                return vector.clone();
            }
        }
        let mut acc = vec![0.0f32; 8];
        for (i, b) in text.bytes().enumerate() {
            acc[i % 8] += f32::from(b) / 255.0;
        }
        acc
    }
}

#[async_trait]
impl EmbeddingProvider for StaticEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if self.fail {
            return Err(EmbeddingError::EmbedError("stubbed failure".to_string()));
        }
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn dimension(&self) -> usize {
        8
    }

    fn model_name(&self) -> &str {
        "static-test-embedder"
    }
}
