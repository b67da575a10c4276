// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mutable request context threaded through the pipeline stages.

use tollgate_core::{PrecomputedResult, WalletHandle};
use tollgate_metrics::RequestMetrics;

/// Which collaborator a failure originated from.
///
/// The failure stage uses this to surface the matching error variant
/// without parsing the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Model,
    Transfer,
    Verification,
    Processing,
}

/// State for one pipeline run, owned exclusively by that run.
///
/// Every stage reads and extends the same context by mutable reference;
/// stages never exchange partial state any other way. The context and its
/// metrics record are discarded after the run returns; only the derived
/// aggregator entry outlives them.
#[derive(Debug)]
pub struct RequestContext {
    /// Unique id for this run. Serves as the aggregator key for runs that
    /// fail before a transaction reference exists, so distinct failures
    /// never overwrite each other.
    pub request_id: String,
    /// The consumer's request text.
    pub request_text: String,
    /// Payer identity.
    pub consumer: WalletHandle,
    /// Payee identity.
    pub provider: WalletHandle,
    /// Transaction reference, set once payment is initiated.
    pub tx_reference: Option<String>,
    /// Set by the verification stage only.
    pub payment_verified: Option<bool>,
    /// Completion tokens billed, set by the consumer stage.
    pub token_usage: Option<u32>,
    /// Cost charged in USDC, set by the consumer stage.
    pub cost: Option<f64>,
    /// Model output captured by the consumer stage.
    pub initial_response: Option<String>,
    /// Final deliverable, set by the provider stage.
    pub content: Option<String>,
    /// Externally supplied alternative to model invocation.
    pub precomputed: Option<PrecomputedResult>,
    /// First failure message; later stages must not replace it.
    pub error: Option<String>,
    /// Origin of the first failure.
    pub error_kind: Option<FailureKind>,
    /// Per-request metrics record; created here, never replaced.
    pub metrics: RequestMetrics,
}

impl RequestContext {
    /// Create a context for one run, clocking the metrics from now.
    pub fn new(
        request_text: impl Into<String>,
        consumer: WalletHandle,
        provider: WalletHandle,
    ) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            request_text: request_text.into(),
            consumer,
            provider,
            tx_reference: None,
            payment_verified: None,
            token_usage: None,
            cost: None,
            initial_response: None,
            content: None,
            precomputed: None,
            error: None,
            error_kind: None,
            metrics: RequestMetrics::new(),
        }
    }

    /// Attach a precomputed result supplied by the caller.
    pub fn with_precomputed(mut self, result: PrecomputedResult) -> Self {
        self.precomputed = Some(result);
        self
    }

    /// Record a stage failure: marks the metrics failed and stores the
    /// error and its origin. The first failure wins; subsequent calls
    /// keep the original error and kind.
    pub fn fail(&mut self, kind: FailureKind, message: impl Into<String>) {
        let message = message.into();
        self.metrics.fail(message.clone());
        if self.error.is_none() {
            self.error = Some(message);
            self.error_kind = Some(kind);
        }
    }

    /// Aggregator key for this run: the transaction reference when one
    /// exists, otherwise the generated request id.
    pub fn log_key(&self) -> &str {
        self.tx_reference.as_deref().unwrap_or(&self.request_id)
    }
}
