// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment facilitator wallet client for the Tollgate gateway.
//!
//! Implements [`WalletClient`] over a facilitator HTTP API: a transfer is
//! created, then polled until it settles on-chain or fails. The returned
//! transaction hash becomes the workflow's transaction reference.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tollgate_config::model::WalletConfig;
use tollgate_core::{TollgateError, WalletClient, WalletHandle};
use tracing::info;

use crate::client::FacilitatorClient;
use crate::types::CreateTransferRequest;

/// Facilitator-backed wallet implementing [`WalletClient`].
pub struct FacilitatorWallet {
    client: FacilitatorClient,
    gasless: bool,
}

impl FacilitatorWallet {
    /// Creates a wallet from the wallet configuration section.
    pub fn new(config: &WalletConfig) -> Result<Self, TollgateError> {
        let client = FacilitatorClient::new(
            &config.facilitator_url,
            config.api_key.as_deref(),
            Duration::from_millis(config.poll_interval_ms),
            config.poll_attempts,
        )?;

        info!(facilitator = %config.facilitator_url, "facilitator wallet initialized");

        Ok(Self {
            client,
            gasless: config.gasless,
        })
    }
}

#[async_trait]
impl WalletClient for FacilitatorWallet {
    async fn transfer(
        &self,
        amount: f64,
        asset_id: &str,
        from: &WalletHandle,
        to: &WalletHandle,
    ) -> Result<String, TollgateError> {
        let request = CreateTransferRequest {
            amount,
            asset_id: asset_id.to_string(),
            source_id: from.as_str().to_string(),
            destination_id: to.as_str().to_string(),
            gasless: self.gasless,
        };
        self.client.execute_transfer(&request).await
    }
}
