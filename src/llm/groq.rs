//! OpenAI-compatible chat completion client.
//!
//! Speaks the `/chat/completions` wire format, pointed at Groq by default.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::{ChatGateway, ChatOptions, GatewayError};
use crate::model::LlmConfig;

/// Client for an OpenAI-compatible chat completion endpoint.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

// Wire models - only the fields we need
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqClient {
    /// Create a new client from explicit configuration.
    ///
    /// The credential is required at construction, not at first use, so a
    /// misconfigured deployment fails immediately.
    pub fn new(config: &LlmConfig) -> Result<Self, GatewayError> {
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::MissingCredential);
        }

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Model identifier used for completions.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatGateway for GroqClient {
    async fn chat(&self, prompt: &str, options: ChatOptions) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = options.system.as_deref() {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: prompt,
        });

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: options.temperature.unwrap_or(self.temperature),
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            has_system = options.system.is_some(),
            "Requesting chat completion"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::ApiError { status, message });
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            GatewayError::ParseError(format!("Failed to deserialize completion: {}", e))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GatewayError::EmptyCompletion)?;

        tracing::debug!(
            model = %self.model,
            completion_chars = content.chars().count(),
            "Received chat completion"
        );

        Ok(content.trim().to_string())
    }
}
