// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive fee floors and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::TollgateConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TollgateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.agent.log_level.trim();
    if !LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{level}` is not one of: {}",
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.llm.provider.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "llm.provider must not be empty".to_string(),
        });
    }

    if config.llm.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "llm.max_tokens must be positive".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                config.llm.temperature
            ),
        });
    }

    if config.pricing.per_token_rate < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "pricing.per_token_rate must be non-negative, got {}",
                config.pricing.per_token_rate
            ),
        });
    }

    if config.pricing.minimum_fee <= 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "pricing.minimum_fee must be positive, got {}",
                config.pricing.minimum_fee
            ),
        });
    }

    if config.pricing.agent_flat_cost < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "pricing.agent_flat_cost must be non-negative, got {}",
                config.pricing.agent_flat_cost
            ),
        });
    }

    if config.wallet.asset_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "wallet.asset_id must not be empty".to_string(),
        });
    }

    if config.wallet.facilitator_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "wallet.facilitator_url must not be empty".to_string(),
        });
    }

    if config.wallet.poll_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "wallet.poll_attempts must be at least 1".to_string(),
        });
    }

    // A configured default agent must have a definition.
    if let Some(default) = &config.agents.default
        && !config.agents.definitions.contains_key(default)
    {
        errors.push(ConfigError::Validation {
            message: format!("agents.default `{default}` has no matching definition"),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
