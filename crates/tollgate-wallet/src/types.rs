// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the payment facilitator API.

use serde::{Deserialize, Serialize};

/// Request body for creating a transfer.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTransferRequest {
    pub amount: f64,
    pub asset_id: String,
    pub source_id: String,
    pub destination_id: String,
    pub gasless: bool,
}

/// Lifecycle status of a transfer on the facilitator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    Broadcast,
    Complete,
    Failed,
}

impl TransferStatus {
    /// Whether the transfer has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

/// A transfer resource as returned by create and status endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferResource {
    pub transfer_id: String,
    pub status: TransferStatus,
    /// On-chain transaction hash, present once the transfer completes.
    #[serde(default)]
    pub transaction_hash: Option<String>,
    /// Failure detail, present for failed transfers.
    #[serde(default)]
    pub failure_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_resource_parses_completed() {
        let json = r#"{
            "transfer_id": "tr-1",
            "status": "complete",
            "transaction_hash": "0xabc"
        }"#;
        let resource: TransferResource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.status, TransferStatus::Complete);
        assert!(resource.status.is_terminal());
        assert_eq!(resource.transaction_hash.as_deref(), Some("0xabc"));
    }

    #[test]
    fn pending_is_not_terminal() {
        let json = r#"{"transfer_id": "tr-2", "status": "pending"}"#;
        let resource: TransferResource = serde_json::from_str(json).unwrap();
        assert!(!resource.status.is_terminal());
        assert!(resource.transaction_hash.is_none());
    }
}
