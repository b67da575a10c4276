// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Tollgate gateway.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level Tollgate configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TollgateConfig {
    /// Gateway identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Language model provider settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Wallet and payment facilitator settings.
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Per-token pricing and fee floor settings.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Alternate-producer (agent) definitions.
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Report export settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Gateway identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the gateway.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "tollgate".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Language model provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Provider to use. Currently `anthropic`; unknown values are rejected
    /// at startup by the provider factory.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier for generation requests.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Provider API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Provider API key. `None` falls back to the provider's environment
    /// variable (e.g. `ANTHROPIC_API_KEY`).
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            api_version: default_api_version(),
            api_key: None,
        }
    }
}

fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_temperature() -> f64 {
    0.7
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Wallet and payment facilitator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WalletConfig {
    /// Consumer (payer) wallet id. Required to run queries.
    #[serde(default)]
    pub consumer_id: Option<String>,

    /// Provider (payee) wallet id. Required to run queries.
    #[serde(default)]
    pub provider_id: Option<String>,

    /// Asset used for payment.
    #[serde(default = "default_asset_id")]
    pub asset_id: String,

    /// Request gasless transfers where the facilitator supports them.
    #[serde(default)]
    pub gasless: bool,

    /// Base URL of the payment facilitator API.
    #[serde(default = "default_facilitator_url")]
    pub facilitator_url: String,

    /// Facilitator API key (also settable via `TOLLGATE_WALLET_API_KEY`).
    /// `None` sends unauthenticated requests.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Interval between transfer status polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum number of status polls before giving up on a transfer.
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            consumer_id: None,
            provider_id: None,
            asset_id: default_asset_id(),
            gasless: false,
            facilitator_url: default_facilitator_url(),
            api_key: None,
            poll_interval_ms: default_poll_interval_ms(),
            poll_attempts: default_poll_attempts(),
        }
    }
}

fn default_asset_id() -> String {
    "usdc".to_string()
}

fn default_facilitator_url() -> String {
    "https://api.cdp.coinbase.com".to_string()
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_poll_attempts() -> u32 {
    60
}

/// Per-token pricing and fee floor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Price per completion token, in USDC.
    #[serde(default = "default_per_token_rate")]
    pub per_token_rate: f64,

    /// Minimum fee charged per request, in USDC.
    #[serde(default = "default_minimum_fee")]
    pub minimum_fee: f64,

    /// Token count assumed for agent-produced responses. The agent path
    /// does not report real usage, so this estimate is billed instead.
    #[serde(default = "default_agent_token_estimate")]
    pub agent_token_estimate: u32,

    /// Flat cost charged for agent-produced responses, in USDC.
    #[serde(default = "default_agent_flat_cost")]
    pub agent_flat_cost: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            per_token_rate: default_per_token_rate(),
            minimum_fee: default_minimum_fee(),
            agent_token_estimate: default_agent_token_estimate(),
            agent_flat_cost: default_agent_flat_cost(),
        }
    }
}

fn default_per_token_rate() -> f64 {
    0.000001
}

fn default_minimum_fee() -> f64 {
    0.00001
}

fn default_agent_token_estimate() -> u32 {
    1000
}

fn default_agent_flat_cost() -> f64 {
    0.002
}

/// Alternate-producer (agent) configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentsConfig {
    /// Name of the agent used when `--agent` is given without a value.
    #[serde(default)]
    pub default: Option<String>,

    /// Agent definitions keyed by name.
    #[serde(default)]
    pub definitions: BTreeMap<String, AgentDefinition>,
}

/// One configured agent: a prompt template over the configured model.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentDefinition {
    /// Human-readable description shown by `--list-agents`.
    #[serde(default)]
    pub description: String,

    /// Prompt template. `{request}` is replaced with the query text.
    #[serde(default)]
    pub prompt_template: Option<String>,
}

/// Report export configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Path the JSON report document is written to on `--export-report`.
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
        }
    }
}

fn default_export_path() -> String {
    "tollgate_report.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_documented_pricing() {
        let config = TollgateConfig::default();
        assert_eq!(config.pricing.per_token_rate, 0.000001);
        assert_eq!(config.pricing.minimum_fee, 0.00001);
        assert_eq!(config.pricing.agent_token_estimate, 1000);
        assert_eq!(config.pricing.agent_flat_cost, 0.002);
    }

    #[test]
    fn default_config_wallet_ids_are_unset() {
        let config = TollgateConfig::default();
        assert!(config.wallet.consumer_id.is_none());
        assert!(config.wallet.provider_id.is_none());
        assert_eq!(config.wallet.asset_id, "usdc");
        assert!(!config.wallet.gasless);
    }

    #[test]
    fn default_config_selects_anthropic() {
        let config = TollgateConfig::default();
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.max_tokens, 8192);
    }
}
