// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide transaction monitoring.
//!
//! The [`MonitoringAggregator`] accumulates one [`TransactionRecord`] per
//! completed pipeline run (delivered or failed) and derives summary reports.
//! Independent pipelines share one aggregator through an `Arc`; all access
//! to the underlying map goes through a mutex, so concurrent `record` calls
//! from separate runs never lose updates.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use tollgate_core::TollgateError;
use tracing::info;

use crate::tracker::{RequestMetrics, RequestStatus};

/// One immutable log entry derived from a completed run's metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    /// ISO 8601 timestamp of when the entry was recorded.
    pub timestamp: String,
    /// Completion tokens billed.
    pub tokens: u32,
    /// Cost charged, in USDC.
    pub cost: f64,
    /// Final status of the run.
    pub status: RequestStatus,
    /// Run duration in seconds at recording time.
    pub duration_secs: f64,
    /// Error message for failed runs.
    pub error: Option<String>,
}

/// Summary statistics over all recorded transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_transactions: usize,
    /// Fraction of runs that reached `Delivered`, in `[0, 1]`.
    pub success_rate: f64,
    /// Arithmetic mean cost in USDC.
    pub avg_cost: f64,
    /// Arithmetic mean billed tokens.
    pub avg_tokens: f64,
    /// Arithmetic mean run duration in seconds.
    pub avg_duration_secs: f64,
}

/// A monitoring report: either a summary, or the empty-aggregator sentinel.
///
/// The sentinel serializes as `{"status": "No transactions yet"}` and is
/// distinct from a summary whose `total_transactions` happens to be zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Empty { status: String },
    Summary(ReportSummary),
}

impl Report {
    /// The empty-aggregator sentinel report.
    pub fn empty() -> Self {
        Report::Empty {
            status: "No transactions yet".to_string(),
        }
    }

    /// The summary, if this report carries one.
    pub fn summary(&self) -> Option<&ReportSummary> {
        match self {
            Report::Summary(s) => Some(s),
            Report::Empty { .. } => None,
        }
    }
}

/// The JSON document written by [`MonitoringAggregator::export`].
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    report: &'a Report,
    transactions: &'a HashMap<String, TransactionRecord>,
}

/// Append-only store of completed transaction summaries.
///
/// Constructed explicitly by the hosting process and shared across pipeline
/// runs; entries persist for the life of the process.
#[derive(Debug, Default)]
pub struct MonitoringAggregator {
    transactions: Mutex<HashMap<String, TransactionRecord>>,
}

impl MonitoringAggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one transaction entry keyed by transaction reference (or the
    /// run's request id when no reference exists).
    ///
    /// Recording the same key twice overwrites: the consumer stage's
    /// transfer-failure record and the failure stage's record share a key,
    /// netting one entry per run.
    pub fn record(&self, key: &str, metrics: &RequestMetrics) {
        let record = TransactionRecord {
            timestamp: chrono::Utc::now()
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            tokens: metrics.tokens_used,
            cost: metrics.cost_usdc,
            status: metrics.status(),
            duration_secs: metrics.duration().as_secs_f64(),
            error: metrics.error.clone(),
        };

        info!(
            key = %key,
            status = %record.status,
            tokens = record.tokens,
            cost = record.cost,
            "transaction recorded"
        );

        self.lock().insert(key.to_string(), record);
    }

    /// Generate a report over all recorded transactions.
    ///
    /// Snapshots the map inside the critical section and computes the
    /// averages outside it, so readers do not block writers beyond the copy.
    /// Calling this twice with no intervening `record` yields identical
    /// output.
    pub fn report(&self) -> Report {
        let snapshot: Vec<TransactionRecord> = self.lock().values().cloned().collect();

        if snapshot.is_empty() {
            return Report::empty();
        }

        let total = snapshot.len();
        let delivered = snapshot
            .iter()
            .filter(|r| r.status == RequestStatus::Delivered)
            .count();
        let sum_cost: f64 = snapshot.iter().map(|r| r.cost).sum();
        let sum_tokens: f64 = snapshot.iter().map(|r| f64::from(r.tokens)).sum();
        let sum_duration: f64 = snapshot.iter().map(|r| r.duration_secs).sum();

        Report::Summary(ReportSummary {
            total_transactions: total,
            success_rate: delivered as f64 / total as f64,
            avg_cost: sum_cost / total as f64,
            avg_tokens: sum_tokens / total as f64,
            avg_duration_secs: sum_duration / total as f64,
        })
    }

    /// Cloned snapshot of all transaction entries, for presentation.
    pub fn transactions(&self) -> HashMap<String, TransactionRecord> {
        self.lock().clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no entries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Serialize `{report, transactions}` as pretty JSON to `path`.
    pub fn export(&self, path: &Path) -> Result<(), TollgateError> {
        let transactions = self.transactions();
        let report = self.report();
        let document = ExportDocument {
            report: &report,
            transactions: &transactions,
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| TollgateError::Internal(format!("report serialization failed: {e}")))?;
        std::fs::write(path, json)?;

        info!(path = %path.display(), entries = transactions.len(), "report exported");
        Ok(())
    }

    /// Lock the transaction map, recovering from a poisoned lock.
    ///
    /// A panic in another thread while holding the lock leaves the map
    /// intact for our access pattern (whole-value inserts and reads).
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, TransactionRecord>> {
        self.transactions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
