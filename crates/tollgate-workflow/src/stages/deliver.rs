// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery stage: finalizes a successful run.

use std::sync::Arc;

use serde::Serialize;
use tollgate_metrics::{MonitoringAggregator, RequestStatus};
use tracing::info;

use crate::context::RequestContext;

/// The success payload returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    /// The delivered content.
    pub content: String,
    /// Reference of the settled payment.
    pub tx_reference: String,
    /// Completion tokens billed.
    pub token_usage: u32,
    /// Cost charged, in USDC.
    pub cost: f64,
    /// Producer name when an agent supplied the content.
    pub producer: Option<String>,
}

/// Releases the content and logs the transaction.
pub struct DeliveryStage {
    aggregator: Arc<MonitoringAggregator>,
}

impl DeliveryStage {
    pub fn new(aggregator: Arc<MonitoringAggregator>) -> Self {
        Self { aggregator }
    }

    pub fn run(&self, ctx: &mut RequestContext) -> QueryOutcome {
        ctx.metrics.advance(RequestStatus::Delivered);
        self.aggregator.record(ctx.log_key(), &ctx.metrics);
        info!(key = %ctx.log_key(), "delivering response");

        QueryOutcome {
            content: ctx.content.clone().unwrap_or_default(),
            tx_reference: ctx.tx_reference.clone().unwrap_or_default(),
            token_usage: ctx.token_usage.unwrap_or(0),
            cost: ctx.cost.unwrap_or(0.0),
            producer: ctx.metrics.producer.clone(),
        }
    }
}
