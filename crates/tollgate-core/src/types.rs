// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Tollgate workspace.

use serde::{Deserialize, Serialize};

/// Opaque identity of a payer or payee wallet.
///
/// The workflow never interprets the contents; wallet adapters map it to
/// whatever their backend expects (a wallet id, an address, an account name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletHandle(pub String);

impl WalletHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token counts reported by a language model for one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u32,
    /// Tokens produced in the completion. Billing is based on this count.
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// A complete language model reply: the generated text plus token counts.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub content: String,
    pub usage: TokenUsage,
}

/// Content produced by an alternate producer before the pipeline runs.
///
/// When present and successful, the provider stage substitutes this for its
/// own generation and tags the request metrics with the producer name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecomputedResult {
    /// The produced content.
    pub content: String,
    /// Name of the producer (e.g. the agent that ran).
    pub producer: String,
    /// Whether production succeeded. Unsuccessful results are ignored.
    pub success: bool,
}
