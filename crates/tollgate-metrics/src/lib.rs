// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metrics and monitoring for the Tollgate gateway.
//!
//! This crate provides:
//! - **Request tracker**: per-request mutable record of tokens, cost,
//!   status, and timing, with forward-only status transitions
//! - **Monitoring aggregator**: process-wide transaction log with summary
//!   reports and JSON export
//! - **Pricing**: token-proportional fee calculation with a minimum floor

pub mod monitor;
pub mod pricing;
pub mod tracker;

pub use monitor::{MonitoringAggregator, Report, ReportSummary, TransactionRecord};
pub use pricing::PricingPolicy;
pub use tracker::{RequestMetrics, RequestStatus};
