// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alternate-producer capability trait.

use async_trait::async_trait;

use crate::error::TollgateError;
use crate::types::PrecomputedResult;

/// An alternate producer that can answer a query before the pipeline runs.
///
/// The caller executes the agent first and passes the outcome into the
/// workflow; the provider stage substitutes it for model output when
/// `success` is true.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Runs the agent against the query.
    async fn execute(&self, query: &str) -> Result<PrecomputedResult, TollgateError>;

    /// Name of this agent (used to tag request metrics).
    fn name(&self) -> &str;
}
