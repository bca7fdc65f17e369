//! HTTP adapter for the Anthropic messages API
//!
//! Unlike a client with internal backoff, this adapter surfaces every
//! failure immediately: the pipeline turns a failed call into a retry ask
//! on the interaction channel, so the human decides whether to try again.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::provider::{CompletionOptions, CompletionProvider, ProviderError};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Message in the messages API request
#[derive(Debug, Clone, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

/// Messages API request body
#[derive(Debug, Clone, Serialize)]
struct ApiRequest {
    model: String,
    max_tokens: usize,
    messages: Vec<ApiMessage>,
}

/// Messages API response body
#[derive(Debug, Clone, Deserialize)]
struct ApiResponse {
    content: Vec<ApiContent>,
}

/// Content block in the response
#[derive(Debug, Clone, Deserialize)]
struct ApiContent {
    text: String,
}

/// Completion provider backed by the Anthropic messages endpoint
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_url: String,
}

impl AnthropicProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Override the endpoint, for tests and proxies
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl Default for AnthropicProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn execute(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        if options.api_key.is_empty() {
            return Err(ProviderError::new("no API key configured"));
        }

        let request = ApiRequest {
            model: options.model.clone(),
            max_tokens: options.max_tokens,
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!("Sending completion request ({} chars)", prompt.len());

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &options.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::new(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(ProviderError::new(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::new(format!("failed to parse response: {}", e)))?;

        let text = api_response
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| ProviderError::new("no content in response"))?;

        debug!("Completion received ({} chars)", text.len());
        Ok(text)
    }
}
