// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application wiring: adapter construction and the query/report flow.

use std::sync::Arc;

use tollgate_anthropic::AnthropicModel;
use tollgate_config::TollgateConfig;
use tollgate_config::model::LlmConfig;
use tollgate_core::{
    AgentExecutor, ModelClient, PrecomputedResult, TollgateError, WalletClient, WalletHandle,
};
use tollgate_metrics::{MonitoringAggregator, PricingPolicy};
use tollgate_wallet::FacilitatorWallet;
use tollgate_workflow::{QueryOutcome, WorkflowEngine};
use tracing::warn;

use crate::agent::BasicAgent;
use crate::output;

/// Models known per provider, for `--list-models`.
const ANTHROPIC_MODELS: &[&str] = &[
    "claude-opus-4-20250514",
    "claude-sonnet-4-20250514",
    "claude-haiku-4-5-20250901",
];

/// Select the model client implementation from `llm.provider`.
///
/// This is the one place provider names are interpreted; the workflow only
/// ever sees the trait object.
pub fn build_model_client(llm: &LlmConfig) -> Result<Arc<dyn ModelClient>, TollgateError> {
    match llm.provider.as_str() {
        "anthropic" => Ok(Arc::new(AnthropicModel::new(llm)?)),
        other => Err(TollgateError::Config(format!(
            "unknown llm provider `{other}` (valid providers: anthropic)"
        ))),
    }
}

/// Models available for the given provider, for `--list-models`.
pub fn list_models(provider: &str) -> Result<&'static [&'static str], TollgateError> {
    match provider {
        "anthropic" => Ok(ANTHROPIC_MODELS),
        other => Err(TollgateError::Config(format!(
            "unknown llm provider `{other}` (valid providers: anthropic)"
        ))),
    }
}

/// The assembled gateway: adapters, engine, and the shared aggregator.
pub struct App {
    config: TollgateConfig,
    model: Arc<dyn ModelClient>,
    engine: WorkflowEngine,
    aggregator: Arc<MonitoringAggregator>,
}

impl App {
    /// Build all adapters from config and wire the workflow engine.
    pub fn initialize(config: TollgateConfig) -> Result<Self, TollgateError> {
        let model = build_model_client(&config.llm)?;
        let wallet: Arc<dyn WalletClient> = Arc::new(FacilitatorWallet::new(&config.wallet)?);
        let pricing = PricingPolicy::from_config(&config.pricing);
        let aggregator = Arc::new(MonitoringAggregator::new());

        let engine = WorkflowEngine::new(
            Arc::clone(&model),
            wallet,
            pricing,
            Arc::clone(&aggregator),
            config.wallet.asset_id.clone(),
        );

        Ok(Self {
            config,
            model,
            engine,
            aggregator,
        })
    }

    /// Process one query through the paid workflow, optionally preceded by
    /// an agent pass whose result the provider stage may substitute.
    pub async fn process_query(
        &self,
        query: &str,
        agent_name: Option<&str>,
    ) -> Result<QueryOutcome, TollgateError> {
        let consumer = self.wallet_handle(self.config.wallet.consumer_id.as_deref(), "consumer")?;
        let provider = self.wallet_handle(self.config.wallet.provider_id.as_deref(), "provider")?;

        let precomputed = match agent_name {
            Some(name) => self.run_agent(name, query).await?,
            None => None,
        };

        let outcome = self
            .engine
            .run_query(query, consumer, provider, precomputed)
            .await?;

        output::print_transaction_details(&outcome);
        output::print_response_content(&outcome.content);
        Ok(outcome)
    }

    /// Print the monitoring report and transaction history; optionally
    /// export the JSON document.
    pub fn show_report(&self, export: bool) -> Result<(), TollgateError> {
        output::print_report(&self.aggregator.report());
        output::print_transactions(&self.aggregator.transactions());

        if export {
            let path = std::path::Path::new(&self.config.report.export_path);
            self.aggregator.export(path)?;
            println!("\nReport exported to {}", path.display());
        }
        Ok(())
    }

    /// Agents configured for this gateway.
    pub fn agents(&self) -> &tollgate_config::model::AgentsConfig {
        &self.config.agents
    }

    /// Run the named agent. A misconfigured agent is a hard error; an agent
    /// that fails at runtime logs a warning and falls back to the standard
    /// model path.
    async fn run_agent(
        &self,
        name: &str,
        query: &str,
    ) -> Result<Option<PrecomputedResult>, TollgateError> {
        let agent = BasicAgent::from_config(name, &self.config.agents, Arc::clone(&self.model))?;
        match agent.execute(query).await {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                warn!(agent = name, error = %e, "agent execution failed, falling back to standard processing");
                Ok(None)
            }
        }
    }

    fn wallet_handle(
        &self,
        id: Option<&str>,
        role: &str,
    ) -> Result<WalletHandle, TollgateError> {
        match id {
            Some(id) if !id.trim().is_empty() => Ok(WalletHandle(id.to_string())),
            _ => Err(TollgateError::Config(format!(
                "wallet.{role}_id is required to run queries"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_is_rejected_at_startup() {
        let mut llm = LlmConfig::default();
        llm.provider = "groq".to_string();
        let err = build_model_client(&llm).err().unwrap();
        assert!(matches!(err, TollgateError::Config(_)));
        assert!(err.to_string().contains("groq"));
    }

    #[test]
    fn list_models_knows_anthropic() {
        let models = list_models("anthropic").unwrap();
        assert!(models.contains(&"claude-sonnet-4-20250514"));
    }

    #[test]
    fn list_models_rejects_unknown_provider() {
        assert!(list_models("mystery").is_err());
    }

    #[test]
    fn missing_wallet_ids_block_queries() {
        // Config without wallet ids builds an app only if the model client
        // can be constructed, so test the handle check directly.
        let config = TollgateConfig::default();
        let app = App {
            config,
            model: Arc::new(NullModel),
            engine: null_engine(),
            aggregator: Arc::new(MonitoringAggregator::new()),
        };
        let err = app.wallet_handle(None, "consumer").unwrap_err();
        assert!(err.to_string().contains("consumer_id"));
        let err = app.wallet_handle(Some("  "), "provider").unwrap_err();
        assert!(err.to_string().contains("provider_id"));
    }

    struct NullModel;

    #[async_trait::async_trait]
    impl ModelClient for NullModel {
        async fn generate(
            &self,
            _prompt: &str,
        ) -> Result<tollgate_core::ModelReply, TollgateError> {
            Err(TollgateError::model("null model"))
        }

        fn model_name(&self) -> &str {
            "null"
        }
    }

    struct NullWallet;

    #[async_trait::async_trait]
    impl WalletClient for NullWallet {
        async fn transfer(
            &self,
            _amount: f64,
            _asset_id: &str,
            _from: &WalletHandle,
            _to: &WalletHandle,
        ) -> Result<String, TollgateError> {
            Err(TollgateError::transfer("null wallet"))
        }
    }

    fn null_engine() -> WorkflowEngine {
        WorkflowEngine::new(
            Arc::new(NullModel),
            Arc::new(NullWallet),
            PricingPolicy::default(),
            Arc::new(MonitoringAggregator::new()),
            "usdc".to_string(),
        )
    }
}
