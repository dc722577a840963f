use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::config::EnrichmentConfig;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("text generation timed out")]
    Timeout,
    #[error("text generation request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("text generation service responded with status {0}")]
    Status(u16),
    #[error("text generation response carried no message content")]
    MissingContent,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Transport(err)
        }
    }
}

/// One chat-style completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Text-generation capability used by the enrichment pass.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// OpenAI-compatible `/chat/completions` client.
pub struct OpenAiTextGenerator {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiTextGenerator {
    pub fn new(config: &EnrichmentConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GenerationError::Client)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = json!({
            "model": request.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }

        let payload: Value = response.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(GenerationError::MissingContent)?;
        debug!(
            model = %request.model,
            chars = content.len(),
            "received text generation response"
        );
        Ok(content.to_string())
    }
}
