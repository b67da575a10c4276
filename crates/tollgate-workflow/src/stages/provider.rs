// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider stage: selects the deliverable content.

use tollgate_metrics::{PricingPolicy, RequestStatus};
use tracing::info;

use crate::context::{FailureKind, RequestContext};

/// Produces the deliverable for a verified request.
///
/// A successful precomputed result takes precedence over the model's own
/// response; its usage and cost are policy-estimated constants, since the
/// producer reports no real measurements.
pub struct ProviderStage {
    pricing: PricingPolicy,
}

impl ProviderStage {
    pub fn new(pricing: PricingPolicy) -> Self {
        Self { pricing }
    }

    pub fn run(&self, ctx: &mut RequestContext) {
        // The engine only routes verified runs here; re-validate anyway so a
        // misused stage cannot release unpaid content.
        if ctx.payment_verified != Some(true) {
            ctx.fail(FailureKind::Processing, "payment not verified");
            return;
        }

        let precomputed = ctx.precomputed.as_ref().filter(|p| p.success).cloned();
        if let Some(result) = precomputed {
            info!(producer = %result.producer, "using precomputed agent result");
            let (tokens, cost) = self.pricing.agent_estimate();
            ctx.content = Some(result.content);
            ctx.token_usage = Some(tokens);
            ctx.cost = Some(cost);
            ctx.metrics.tokens_used = tokens;
            ctx.metrics.cost_usdc = cost;
            ctx.metrics.producer = Some(result.producer);
            ctx.metrics.advance(RequestStatus::ProcessedByAgent);
            return;
        }

        match ctx.initial_response.take() {
            Some(content) => {
                ctx.content = Some(content);
                ctx.metrics.advance(RequestStatus::Processed);
            }
            None => {
                ctx.fail(
                    FailureKind::Processing,
                    "Processing failed: model response missing",
                );
            }
        }
    }
}
