// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude model client for the Tollgate gateway.
//!
//! Implements [`ModelClient`] over the Messages API, mapping the response
//! text and token usage into the shapes the workflow bills against.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tollgate_config::model::LlmConfig;
use tollgate_core::{ModelClient, ModelReply, TokenUsage, TollgateError};
use tracing::info;

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Anthropic Claude model implementing [`ModelClient`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicModel {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl AnthropicModel {
    /// Creates a model client from the LLM configuration section.
    pub fn new(config: &LlmConfig) -> Result<Self, TollgateError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = AnthropicClient::new(&api_key, &config.api_version)?;

        info!(model = %config.model, "Anthropic model client initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Creates a model with an existing HTTP client (for testing).
    #[cfg(test)]
    fn with_client(client: AnthropicClient, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

#[async_trait]
impl ModelClient for AnthropicModel {
    async fn generate(&self, prompt: &str) -> Result<ModelReply, TollgateError> {
        let request = MessageRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![ApiMessage::user(prompt)],
        };

        let response = self.client.complete_message(&request).await?;

        Ok(ModelReply {
            content: response.text(),
            usage: TokenUsage {
                prompt_tokens: response.usage.input_tokens,
                completion_tokens: response.usage.output_tokens,
            },
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Resolve the API key from config or the `ANTHROPIC_API_KEY` env var.
fn resolve_api_key(configured: &Option<String>) -> Result<String, TollgateError> {
    if let Some(key) = configured
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    match std::env::var("ANTHROPIC_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(TollgateError::Config(
            "Anthropic API key not found: set llm.api_key or ANTHROPIC_API_KEY".to_string(),
        )),
    }
}
