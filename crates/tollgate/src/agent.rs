// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt-template agents over the configured model.
//!
//! An agent wraps the model client with a configured prompt template; its
//! output enters the workflow as a precomputed result. Tool-augmented
//! agents are out of scope.

use std::sync::Arc;

use async_trait::async_trait;
use tollgate_config::model::AgentsConfig;
use tollgate_core::{AgentExecutor, ModelClient, PrecomputedResult, TollgateError};
use tracing::info;

const DEFAULT_TEMPLATE: &str =
    "You are a helpful assistant. Answer the following request: {request}";

/// A configured prompt-template agent.
pub struct BasicAgent {
    model: Arc<dyn ModelClient>,
    name: String,
    template: String,
}

impl BasicAgent {
    /// Look up `name` in the agents config and build the agent.
    pub fn from_config(
        name: &str,
        agents: &AgentsConfig,
        model: Arc<dyn ModelClient>,
    ) -> Result<Self, TollgateError> {
        let definition = agents.definitions.get(name).ok_or_else(|| {
            TollgateError::Config(format!(
                "agent `{name}` not found in configuration (available: {})",
                available_names(agents)
            ))
        })?;

        let template = definition
            .prompt_template
            .clone()
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());

        Ok(Self {
            model,
            name: name.to_string(),
            template,
        })
    }
}

#[async_trait]
impl AgentExecutor for BasicAgent {
    async fn execute(&self, query: &str) -> Result<PrecomputedResult, TollgateError> {
        let prompt = self.template.replace("{request}", query);
        info!(agent = %self.name, "executing agent");

        let reply = self.model.generate(&prompt).await?;
        Ok(PrecomputedResult {
            content: reply.content,
            producer: self.name.clone(),
            success: true,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Comma-separated agent names for error messages and `--list-agents`.
pub fn available_names(agents: &AgentsConfig) -> String {
    if agents.definitions.is_empty() {
        return "none configured".to_string();
    }
    agents
        .definitions
        .keys()
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_config::model::AgentDefinition;
    use tollgate_core::{ModelReply, TokenUsage};

    struct StubModel;

    #[async_trait]
    impl ModelClient for StubModel {
        async fn generate(&self, prompt: &str) -> Result<ModelReply, TollgateError> {
            Ok(ModelReply {
                content: format!("reply to: {prompt}"),
                usage: TokenUsage::default(),
            })
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    fn agents_config() -> AgentsConfig {
        let mut config = AgentsConfig::default();
        config.definitions.insert(
            "research".to_string(),
            AgentDefinition {
                description: "Literature survey".to_string(),
                prompt_template: Some("Survey the literature on: {request}".to_string()),
            },
        );
        config.definitions.insert(
            "basic_llm".to_string(),
            AgentDefinition::default(),
        );
        config
    }

    #[tokio::test]
    async fn agent_applies_its_template() {
        let agent =
            BasicAgent::from_config("research", &agents_config(), Arc::new(StubModel)).unwrap();
        let result = agent.execute("ion channels").await.unwrap();

        assert!(result.success);
        assert_eq!(result.producer, "research");
        assert_eq!(
            result.content,
            "reply to: Survey the literature on: ion channels"
        );
    }

    #[tokio::test]
    async fn missing_template_falls_back_to_default() {
        let agent =
            BasicAgent::from_config("basic_llm", &agents_config(), Arc::new(StubModel)).unwrap();
        let result = agent.execute("hello").await.unwrap();
        assert!(result.content.contains("Answer the following request: hello"));
    }

    #[test]
    fn unknown_agent_is_a_config_error() {
        let err = BasicAgent::from_config("nope", &agents_config(), Arc::new(StubModel))
            .err()
            .unwrap();
        assert!(matches!(err, TollgateError::Config(_)));
        assert!(err.to_string().contains("basic_llm, research"));
    }

    #[test]
    fn available_names_handles_empty() {
        assert_eq!(available_names(&AgentsConfig::default()), "none configured");
    }
}
