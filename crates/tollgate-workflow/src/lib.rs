// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pay-per-request workflow state machine for the Tollgate gateway.
//!
//! One [`WorkflowEngine::run_query`] call drives a single request through
//! the ordered stages: consumer (model invocation + payment), payment
//! verification, provider (content selection), and delivery, with a
//! failure branch that finalizes any stage fault. Each run owns its
//! [`RequestContext`] and metrics exclusively; completed runs leave exactly
//! one entry in the shared monitoring aggregator.

pub mod context;
pub mod engine;
pub mod stages;

pub use context::{FailureKind, RequestContext};
pub use engine::{WorkflowEngine, WorkflowState};
pub use stages::QueryOutcome;
