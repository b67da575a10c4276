// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wallet transfer capability trait.

use async_trait::async_trait;

use crate::error::TollgateError;
use crate::types::WalletHandle;

/// A wallet backend that moves funds between two parties.
///
/// `transfer` blocks until the transfer has resolved on the backend and
/// returns the confirmed transaction reference, or fails with
/// [`TollgateError::Transfer`]. No retry happens at this layer.
#[async_trait]
pub trait WalletClient: Send + Sync {
    /// Transfers `amount` of `asset_id` from `from` to `to`.
    ///
    /// Returns the transaction reference of the settled transfer.
    async fn transfer(
        &self,
        amount: f64,
        asset_id: &str,
        from: &WalletHandle,
        to: &WalletHandle,
    ) -> Result<String, TollgateError>;
}
