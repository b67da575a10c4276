// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request metrics tracking.
//!
//! A [`RequestMetrics`] record is created at the start of one pipeline run
//! and mutated by each stage as the request moves through payment,
//! verification, and delivery. Duration is computed on demand rather than
//! stored.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

/// Lifecycle status of one paid request.
///
/// Statuses advance along `Pending -> Paid -> Verified ->
/// Processed | ProcessedByAgent -> Delivered`, or jump to `Failed` from any
/// point. `Failed` is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    /// Request received, nothing paid yet.
    Pending,
    /// Payment transfer settled.
    Paid,
    /// Transaction reference verified.
    Verified,
    /// Deliverable produced from the model's own response.
    Processed,
    /// Deliverable substituted from a precomputed agent result.
    ProcessedByAgent,
    /// Response released to the consumer.
    Delivered,
    /// The run failed at some stage.
    Failed,
}

impl RequestStatus {
    /// Position along the forward chain. `Processed` and `ProcessedByAgent`
    /// share a rank; `Failed` is handled separately.
    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Paid => 1,
            Self::Verified => 2,
            Self::Processed | Self::ProcessedByAgent => 3,
            Self::Delivered => 4,
            Self::Failed => u8::MAX,
        }
    }
}

/// Mutable per-request tracker of token usage, cost, status, and timing.
#[derive(Debug, Clone)]
pub struct RequestMetrics {
    /// Monotonic start instant, for duration measurement.
    started_at: Instant,
    /// Completion tokens billed for this request.
    pub tokens_used: u32,
    /// Cost charged, in USDC.
    pub cost_usdc: f64,
    /// Current lifecycle status.
    status: RequestStatus,
    /// First error encountered, if any.
    pub error: Option<String>,
    /// Producer name when the deliverable came from an agent.
    pub producer: Option<String>,
}

impl RequestMetrics {
    /// Create a fresh tracker in `Pending` state, clocked from now.
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            tokens_used: 0,
            cost_usdc: 0.0,
            status: RequestStatus::Pending,
            error: None,
            producer: None,
        }
    }

    /// Current status.
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Advance the status along the forward chain.
    ///
    /// Transitions only move forward or jump to `Failed`; a regression
    /// attempt is ignored and logged. `Failed` is absorbing: once failed,
    /// the status never changes again (re-failing is an idempotent no-op).
    pub fn advance(&mut self, next: RequestStatus) {
        if self.status == RequestStatus::Failed {
            if next != RequestStatus::Failed {
                warn!(current = %self.status, attempted = %next, "ignoring status change after failure");
            }
            return;
        }
        if next == RequestStatus::Failed || next.rank() > self.status.rank() {
            self.status = next;
        } else {
            warn!(current = %self.status, attempted = %next, "ignoring status regression");
        }
    }

    /// Mark the request failed, recording the first error message.
    ///
    /// Later failures keep the original error so the root cause survives
    /// through the failure stage.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.advance(RequestStatus::Failed);
        if self.error.is_none() {
            self.error = Some(error.into());
        }
    }

    /// Elapsed time since the request started.
    pub fn duration(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }
}

impl Default for RequestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn new_metrics_start_pending_and_zeroed() {
        let metrics = RequestMetrics::new();
        assert_eq!(metrics.status(), RequestStatus::Pending);
        assert_eq!(metrics.tokens_used, 0);
        assert_eq!(metrics.cost_usdc, 0.0);
        assert!(metrics.error.is_none());
    }

    #[test]
    fn status_advances_along_the_chain() {
        let mut metrics = RequestMetrics::new();
        for next in [
            RequestStatus::Paid,
            RequestStatus::Verified,
            RequestStatus::Processed,
            RequestStatus::Delivered,
        ] {
            metrics.advance(next);
            assert_eq!(metrics.status(), next);
        }
    }

    #[test]
    fn regression_is_ignored() {
        let mut metrics = RequestMetrics::new();
        metrics.advance(RequestStatus::Verified);
        metrics.advance(RequestStatus::Paid);
        assert_eq!(metrics.status(), RequestStatus::Verified);
    }

    #[test]
    fn failed_is_absorbing() {
        let mut metrics = RequestMetrics::new();
        metrics.advance(RequestStatus::Paid);
        metrics.fail("transfer rejected");
        assert_eq!(metrics.status(), RequestStatus::Failed);

        metrics.advance(RequestStatus::Delivered);
        assert_eq!(metrics.status(), RequestStatus::Failed);

        // Re-failing keeps the first error.
        metrics.fail("second failure");
        assert_eq!(metrics.error.as_deref(), Some("transfer rejected"));
    }

    #[test]
    fn failure_reachable_from_any_point() {
        let mut fresh = RequestMetrics::new();
        fresh.fail("early");
        assert_eq!(fresh.status(), RequestStatus::Failed);

        let mut late = RequestMetrics::new();
        late.advance(RequestStatus::Paid);
        late.advance(RequestStatus::Verified);
        late.advance(RequestStatus::ProcessedByAgent);
        late.fail("late");
        assert_eq!(late.status(), RequestStatus::Failed);
    }

    #[test]
    fn processed_variants_share_a_rank() {
        let mut metrics = RequestMetrics::new();
        metrics.advance(RequestStatus::Verified);
        metrics.advance(RequestStatus::Processed);
        // Sideways move between the two processed forms is a regression.
        metrics.advance(RequestStatus::ProcessedByAgent);
        assert_eq!(metrics.status(), RequestStatus::Processed);
        metrics.advance(RequestStatus::Delivered);
        assert_eq!(metrics.status(), RequestStatus::Delivered);
    }

    #[test]
    fn status_display_and_parse_round_trip() {
        assert_eq!(RequestStatus::ProcessedByAgent.to_string(), "processed_by_agent");
        assert_eq!(
            RequestStatus::from_str("delivered").unwrap(),
            RequestStatus::Delivered
        );
    }

    #[test]
    fn duration_is_computed_on_demand() {
        let metrics = RequestMetrics::new();
        let first = metrics.duration();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = metrics.duration();
        assert!(second > first);
    }
}
