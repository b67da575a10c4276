// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consumer stage: model invocation, cost calculation, payment initiation.

use std::sync::Arc;

use tollgate_core::{ModelClient, TollgateError, WalletClient};
use tollgate_metrics::{MonitoringAggregator, PricingPolicy, RequestStatus};
use tracing::{info, warn};

use crate::context::{FailureKind, RequestContext};

/// First stage of the pipeline.
///
/// Invokes the model, computes the fee from the completion token count, and
/// transfers it from consumer to provider, blocking until the transfer
/// resolves. On success the context carries the transaction reference and
/// the metrics move to `Paid`.
pub struct ConsumerStage {
    model: Arc<dyn ModelClient>,
    wallet: Arc<dyn WalletClient>,
    pricing: PricingPolicy,
    aggregator: Arc<MonitoringAggregator>,
    asset_id: String,
}

impl ConsumerStage {
    pub fn new(
        model: Arc<dyn ModelClient>,
        wallet: Arc<dyn WalletClient>,
        pricing: PricingPolicy,
        aggregator: Arc<MonitoringAggregator>,
        asset_id: String,
    ) -> Self {
        Self {
            model,
            wallet,
            pricing,
            aggregator,
            asset_id,
        }
    }

    /// Run the stage.
    ///
    /// The only direct error is the pre-transaction validation failure for
    /// an empty request: no payment exists yet, so no transaction entry is
    /// logged and the engine returns it to the caller as-is. Model and
    /// transfer failures are absorbed into the context (and logged under
    /// the run's request id) for the failure branch to surface.
    pub async fn run(&self, ctx: &mut RequestContext) -> Result<(), TollgateError> {
        if ctx.request_text.trim().is_empty() {
            return Err(TollgateError::Validation(
                "No data request provided".to_string(),
            ));
        }

        info!(model = self.model.model_name(), "processing request with model");
        let reply = match self.model.generate(&ctx.request_text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "model invocation failed");
                ctx.fail(FailureKind::Model, e.to_string());
                self.aggregator.record(ctx.log_key(), &ctx.metrics);
                return Ok(());
            }
        };

        let tokens = reply.usage.completion_tokens;
        let cost = self.pricing.compute_cost(tokens);

        info!(cost, asset = %self.asset_id, "sending payment");
        match self
            .wallet
            .transfer(cost, &self.asset_id, &ctx.consumer, &ctx.provider)
            .await
        {
            Ok(tx_reference) => {
                ctx.tx_reference = Some(tx_reference);
                ctx.token_usage = Some(tokens);
                ctx.cost = Some(cost);
                ctx.initial_response = Some(reply.content);
                ctx.metrics.tokens_used = tokens;
                ctx.metrics.cost_usdc = cost;
                ctx.metrics.advance(RequestStatus::Paid);
            }
            Err(e) => {
                warn!(error = %e, "payment transfer failed");
                ctx.fail(FailureKind::Transfer, format!("Payment failed: {e}"));
                self.aggregator.record(ctx.log_key(), &ctx.metrics);
            }
        }

        Ok(())
    }
}
