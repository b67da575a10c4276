// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language model capability trait.

use async_trait::async_trait;

use crate::error::TollgateError;
use crate::types::ModelReply;

/// A language model that turns request text into content plus token counts.
///
/// Implementations handle authentication, request construction, and transient
/// retry internally; the workflow awaits one call to completion or failure.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generates a reply for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<ModelReply, TollgateError>;

    /// Model identifier used for generation (for logging and listings).
    fn model_name(&self) -> &str;
}
