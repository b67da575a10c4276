// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tollgate pay-per-request gateway.

use thiserror::Error;

/// The primary error type used across all Tollgate collaborator traits and
/// pipeline stages.
#[derive(Debug, Error)]
pub enum TollgateError {
    /// Request validation errors (empty request text, malformed input).
    #[error("{0}")]
    Validation(String),

    /// Language model errors (API failure, token limits, model not found).
    #[error("model error: {message}")]
    Model {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Payment transfer errors (rejected transfer, facilitator failure).
    #[error("transfer error: {message}")]
    Transfer {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Payment verification errors (transaction reference absent).
    #[error("verification error: {0}")]
    Verification(String),

    /// Provider-stage processing errors.
    #[error("processing error: {0}")]
    Processing(String),

    /// Configuration errors (invalid TOML, missing API key, unknown provider).
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors (report export, query file reads).
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TollgateError {
    /// Build a `Model` error from a message alone.
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
            source: None,
        }
    }

    /// Build a `Transfer` error from a message alone.
    pub fn transfer(message: impl Into<String>) -> Self {
        Self::Transfer {
            message: message.into(),
            source: None,
        }
    }
}
