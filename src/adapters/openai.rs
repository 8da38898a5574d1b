//! OpenAI chat-completions client used by the risk-analysis path
//!
//! Error bodies are surfaced verbatim so the analysis layer can classify
//! them by the provider's error codes (`context_length_exceeded`,
//! `rate_limit_exceeded`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::adapters::{CompletionProvider, ProviderError, ProviderResult};
use crate::config::AnalysisSettings;

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completions response body (only the fields consumed here)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// HTTP client for the OpenAI chat-completions endpoint
#[derive(Debug)]
pub struct OpenAiAdapter {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiAdapter {
    /// Create a new adapter from analysis settings
    pub fn new(settings: &AnalysisSettings) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(ProviderError::Http)?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiAdapter {
    async fn complete(
        &self,
        system_prompt: &str,
        user_content: &str,
        api_key: &str,
    ) -> ProviderResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            "Requesting completion from {} (model {}, {} bytes of user content)",
            self.endpoint,
            self.model,
            user_content.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("HTTP request failed to {}: {}", self.endpoint, e);
                ProviderError::Http(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Completion endpoint returned error {}: {}", status, error_text);
            return Err(ProviderError::HttpStatus {
                status_code: status.as_u16(),
                reason: error_text,
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            ProviderError::InvalidResponse(format!("JSON parsing failed: {e}"))
        })?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("empty choices list".to_string()))
    }
}
