// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fee calculation for paid requests.
//!
//! The fee is proportional to completion tokens with a configured floor:
//! `cost = max(tokens * per_token_rate, minimum_fee)`. Agent-produced
//! responses bill policy-estimated constants instead of measured usage.

use tollgate_config::model::PricingConfig;

/// Pricing policy derived from configuration.
#[derive(Debug, Clone)]
pub struct PricingPolicy {
    per_token_rate: f64,
    minimum_fee: f64,
    agent_token_estimate: u32,
    agent_flat_cost: f64,
}

impl PricingPolicy {
    /// Build a policy from the pricing config section.
    pub fn from_config(config: &PricingConfig) -> Self {
        Self {
            per_token_rate: config.per_token_rate,
            minimum_fee: config.minimum_fee,
            agent_token_estimate: config.agent_token_estimate,
            agent_flat_cost: config.agent_flat_cost,
        }
    }

    /// Cost for a measured token count, never below the minimum fee.
    pub fn compute_cost(&self, tokens: u32) -> f64 {
        (f64::from(tokens) * self.per_token_rate).max(self.minimum_fee)
    }

    /// Estimated `(tokens, cost)` billed for an agent-produced response.
    ///
    /// The agent path reports no real usage; these are configured
    /// approximations, not measurements.
    pub fn agent_estimate(&self) -> (u32, f64) {
        (self.agent_token_estimate, self.agent_flat_cost)
    }

    /// The configured fee floor.
    pub fn minimum_fee(&self) -> f64 {
        self.minimum_fee
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::from_config(&PricingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_usage_hits_the_floor() {
        let policy = PricingPolicy::default();
        // 5 tokens * 0.000001 = 0.000005, below the 0.00001 floor.
        assert_eq!(policy.compute_cost(5), 0.00001);
    }

    #[test]
    fn large_usage_is_proportional() {
        let policy = PricingPolicy::default();
        assert!((policy.compute_cost(50_000) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn thousand_tokens_cost_a_millicent_each() {
        let policy = PricingPolicy::default();
        assert!((policy.compute_cost(1000) - 0.001).abs() < 1e-12);
    }

    #[test]
    fn zero_tokens_still_pay_the_floor() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.compute_cost(0), policy.minimum_fee());
    }

    #[test]
    fn custom_rate_applies() {
        let config = PricingConfig {
            per_token_rate: 0.00001,
            minimum_fee: 0.0001,
            ..PricingConfig::default()
        };
        let policy = PricingPolicy::from_config(&config);
        assert!((policy.compute_cost(100) - 0.001).abs() < 1e-12);
    }

    #[test]
    fn agent_estimate_returns_configured_constants() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.agent_estimate(), (1000, 0.002));
    }
}
