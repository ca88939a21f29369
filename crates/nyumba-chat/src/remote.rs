//! Remote chat-completion collaborator.
//!
//! [`OpenAiClient`] talks to any OpenAI-compatible `/chat/completions`
//! endpoint. Every failure surfaces as a [`ChatError`]; callers are
//! expected to fall back to local synthesis.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nyumba_core::config::AssistantConfig;

use crate::error::ChatError;

/// Used when the service answers without any message content.
pub const NO_CONTENT_REPLY: &str = "Sorry, I could not process your request.";

/// A service that produces one free-text completion per utterance.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, system_prompt: &str, utterance: &str) -> Result<String, ChatError>;
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [CompletionMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    message: Option<CompletionContent>,
}

#[derive(Debug, Deserialize)]
struct CompletionContent {
    #[serde(default)]
    content: Option<String>,
}

fn first_content(response: CompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| NO_CONTENT_REPLY.to_string())
}

// =============================================================================
// OpenAiClient
// =============================================================================

/// HTTP client for an OpenAI-compatible chat-completion API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiClient {
    /// Client with default sampling settings and no request timeout.
    pub fn new(base_url: &str, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let defaults = AssistantConfig::default();
        Self {
            client: Client::new(),
            endpoint: completions_endpoint(base_url),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
        }
    }

    /// Build from the `[assistant]` config section.
    ///
    /// Fails with [`ChatError::MissingApiKey`] when no key resolves.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, ChatError> {
        let api_key = config.resolve_api_key().ok_or(ChatError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: completions_endpoint(&config.base_url),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Replace the underlying HTTP client, e.g. to change proxy settings.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request<'a>(&'a self, system_prompt: &'a str, utterance: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            messages: [
                CompletionMessage {
                    role: "system",
                    content: system_prompt,
                },
                CompletionMessage {
                    role: "user",
                    content: utterance,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, system_prompt: &str, utterance: &str) -> Result<String, ChatError> {
        let body = self.build_request(system_prompt, utterance);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ChatError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        debug!(model = %self.model, "Remote completion received");
        Ok(first_content(parsed))
    }
}
