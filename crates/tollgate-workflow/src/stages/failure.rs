// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Failure stage: finalizes a failed run.

use std::sync::Arc;

use tollgate_core::TollgateError;
use tollgate_metrics::{MonitoringAggregator, RequestStatus};
use tracing::warn;

use crate::context::{FailureKind, RequestContext};

/// Terminal branch for any stage failure.
///
/// Marks the metrics failed (idempotent if already failed), logs one
/// transaction entry (keyed by the transaction reference when payment was
/// initiated, otherwise by the run's request id), and surfaces the error
/// already present in the context.
pub struct FailureStage {
    aggregator: Arc<MonitoringAggregator>,
}

impl FailureStage {
    pub fn new(aggregator: Arc<MonitoringAggregator>) -> Self {
        Self { aggregator }
    }

    pub fn run(&self, ctx: &mut RequestContext) -> TollgateError {
        ctx.metrics.advance(RequestStatus::Failed);
        if ctx.metrics.error.is_none() {
            ctx.metrics.error = ctx.error.clone();
        }
        self.aggregator.record(ctx.log_key(), &ctx.metrics);

        let message = ctx
            .error
            .clone()
            .unwrap_or_else(|| "Payment failed".to_string());
        warn!(key = %ctx.log_key(), error = %message, "request failed");

        match ctx.error_kind {
            Some(FailureKind::Model) => TollgateError::model(message),
            Some(FailureKind::Transfer) => TollgateError::transfer(message),
            Some(FailureKind::Verification) => TollgateError::Verification(message),
            Some(FailureKind::Processing) => TollgateError::Processing(message),
            None => TollgateError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_core::WalletHandle;

    fn context() -> RequestContext {
        RequestContext::new(
            "query",
            WalletHandle("c".into()),
            WalletHandle("p".into()),
        )
    }

    #[test]
    fn failure_without_reference_is_keyed_by_request_id() {
        let aggregator = Arc::new(MonitoringAggregator::new());
        let stage = FailureStage::new(Arc::clone(&aggregator));

        let mut ctx = context();
        ctx.fail(FailureKind::Verification, "missing transaction reference");

        let err = stage.run(&mut ctx);
        assert!(matches!(err, TollgateError::Verification(_)));

        let transactions = aggregator.transactions();
        assert_eq!(transactions.len(), 1);
        let record = &transactions[&ctx.request_id];
        assert_eq!(record.status, RequestStatus::Failed);
        assert_eq!(
            record.error.as_deref(),
            Some("missing transaction reference")
        );
    }

    #[test]
    fn failure_with_reference_is_keyed_by_it() {
        let aggregator = Arc::new(MonitoringAggregator::new());
        let stage = FailureStage::new(Arc::clone(&aggregator));

        let mut ctx = context();
        ctx.tx_reference = Some("0xdead".into());
        ctx.fail(FailureKind::Processing, "Processing failed: boom");

        let err = stage.run(&mut ctx);
        assert!(matches!(err, TollgateError::Processing(_)));
        assert!(aggregator.transactions().contains_key("0xdead"));
    }

    #[test]
    fn failure_is_idempotent_on_already_failed_metrics() {
        let aggregator = Arc::new(MonitoringAggregator::new());
        let stage = FailureStage::new(Arc::clone(&aggregator));

        let mut ctx = context();
        ctx.fail(FailureKind::Transfer, "Payment failed: rejected");
        let err = stage.run(&mut ctx);

        assert!(matches!(err, TollgateError::Transfer { .. }));
        assert_eq!(ctx.metrics.status(), RequestStatus::Failed);
        assert_eq!(
            ctx.metrics.error.as_deref(),
            Some("Payment failed: rejected")
        );
    }

    #[test]
    fn missing_error_falls_back_to_internal() {
        let aggregator = Arc::new(MonitoringAggregator::new());
        let stage = FailureStage::new(aggregator);

        let mut ctx = context();
        let err = stage.run(&mut ctx);
        assert!(matches!(err, TollgateError::Internal(_)));
        assert_eq!(err.to_string(), "internal error: Payment failed");
    }
}
