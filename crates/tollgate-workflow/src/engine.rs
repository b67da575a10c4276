// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finite-state workflow engine.
//!
//! An explicit state enum plus a pure transition function, driven by an
//! iterative loop. No graph framework compiles or mutates anything at
//! runtime. Each `run_query` call is a single linear pass over one owned
//! context: no retries, no loops, no re-entry.

use std::sync::Arc;

use tollgate_core::{
    ModelClient, PrecomputedResult, TollgateError, WalletClient, WalletHandle,
};
use tollgate_metrics::{MonitoringAggregator, PricingPolicy};
use tracing::debug;

use crate::context::RequestContext;
use crate::stages::{
    ConsumerStage, DeliveryStage, FailureStage, PaymentVerificationStage, ProviderStage,
    QueryOutcome,
};

/// States of one pipeline pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Model invocation and payment initiation.
    Consumer,
    /// Transaction reference check.
    VerifyPayment,
    /// Deliverable selection.
    Provider,
    /// Success finalization.
    Deliver,
    /// Failure finalization.
    Failure,
    /// Terminal.
    Done,
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowState::Consumer => write!(f, "consumer"),
            WorkflowState::VerifyPayment => write!(f, "verify_payment"),
            WorkflowState::Provider => write!(f, "provider"),
            WorkflowState::Deliver => write!(f, "deliver"),
            WorkflowState::Failure => write!(f, "failure"),
            WorkflowState::Done => write!(f, "done"),
        }
    }
}

/// Transition function: the next state given the current state and the
/// context the finished stage left behind.
///
/// The only data-dependent branches are at `VerifyPayment` (verified or
/// not) and `Provider` (clean or failed).
fn next_state(state: WorkflowState, ctx: &RequestContext) -> WorkflowState {
    match state {
        WorkflowState::Consumer => WorkflowState::VerifyPayment,
        WorkflowState::VerifyPayment => {
            if ctx.payment_verified == Some(true) {
                WorkflowState::Provider
            } else {
                WorkflowState::Failure
            }
        }
        WorkflowState::Provider => {
            if ctx.error.is_none() {
                WorkflowState::Deliver
            } else {
                WorkflowState::Failure
            }
        }
        WorkflowState::Deliver | WorkflowState::Failure | WorkflowState::Done => {
            WorkflowState::Done
        }
    }
}

/// Orchestrates the pipeline stages for paid request handling.
///
/// One engine serves many requests; each `run_query` call owns its context
/// and metrics exclusively. The monitoring aggregator is the only shared
/// mutable resource, and it synchronizes internally.
pub struct WorkflowEngine {
    consumer: ConsumerStage,
    verify: PaymentVerificationStage,
    provider: ProviderStage,
    deliver: DeliveryStage,
    failure: FailureStage,
}

impl WorkflowEngine {
    pub fn new(
        model: Arc<dyn ModelClient>,
        wallet: Arc<dyn WalletClient>,
        pricing: PricingPolicy,
        aggregator: Arc<MonitoringAggregator>,
        asset_id: String,
    ) -> Self {
        Self {
            consumer: ConsumerStage::new(
                model,
                wallet,
                pricing.clone(),
                Arc::clone(&aggregator),
                asset_id,
            ),
            verify: PaymentVerificationStage,
            provider: ProviderStage::new(pricing),
            deliver: DeliveryStage::new(Arc::clone(&aggregator)),
            failure: FailureStage::new(aggregator),
        }
    }

    /// Execute exactly one pass of the pipeline for the given request.
    ///
    /// Always returns a well-formed outcome or error; stage faults are
    /// routed through the failure branch rather than unwinding. The one
    /// direct return is the pre-transaction validation error for an empty
    /// request, which produces no transaction entry.
    pub async fn run_query(
        &self,
        request_text: &str,
        consumer: WalletHandle,
        provider: WalletHandle,
        precomputed: Option<PrecomputedResult>,
    ) -> Result<QueryOutcome, TollgateError> {
        let mut ctx = RequestContext::new(request_text, consumer, provider);
        if let Some(result) = precomputed {
            ctx = ctx.with_precomputed(result);
        }

        let mut state = WorkflowState::Consumer;
        let mut outcome = None;

        while state != WorkflowState::Done {
            debug!(request_id = %ctx.request_id, state = %state, "entering stage");
            match state {
                WorkflowState::Consumer => self.consumer.run(&mut ctx).await?,
                WorkflowState::VerifyPayment => self.verify.run(&mut ctx),
                WorkflowState::Provider => self.provider.run(&mut ctx),
                WorkflowState::Deliver => {
                    outcome = Some(Ok(self.deliver.run(&mut ctx)));
                }
                WorkflowState::Failure => {
                    outcome = Some(Err(self.failure.run(&mut ctx)));
                }
                WorkflowState::Done => {}
            }
            state = next_state(state, &ctx);
        }

        outcome.unwrap_or_else(|| {
            Err(TollgateError::Internal(
                "workflow ended without an outcome".to_string(),
            ))
        })
    }
}
