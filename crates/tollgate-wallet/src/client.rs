// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the payment facilitator API.
//!
//! A transfer is created with one POST, then its status is polled until it
//! reaches a terminal state or the attempt budget runs out. The workflow
//! blocks on this resolution; there is no retry of the transfer itself.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tollgate_core::TollgateError;
use tracing::{debug, warn};

use crate::types::{CreateTransferRequest, TransferResource, TransferStatus};

/// HTTP client for facilitator communication.
#[derive(Debug, Clone)]
pub struct FacilitatorClient {
    client: reqwest::Client,
    base_url: String,
    poll_interval: Duration,
    poll_attempts: u32,
}

impl FacilitatorClient {
    /// Creates a facilitator client.
    ///
    /// `api_key`, when present, is sent as a bearer token on every request.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        poll_interval: Duration,
        poll_attempts: u32,
    ) -> Result<Self, TollgateError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                TollgateError::Config(format!("invalid facilitator API key: {e}"))
            })?;
            headers.insert("authorization", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TollgateError::Transfer {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            poll_interval,
            poll_attempts,
        })
    }

    /// Creates a transfer and waits for it to resolve.
    ///
    /// Returns the on-chain transaction hash of the completed transfer.
    pub async fn execute_transfer(
        &self,
        request: &CreateTransferRequest,
    ) -> Result<String, TollgateError> {
        let mut resource = self.create_transfer(request).await?;
        debug!(transfer_id = %resource.transfer_id, status = ?resource.status, "transfer created");

        let mut attempts = 0;
        while !resource.status.is_terminal() {
            if attempts >= self.poll_attempts {
                return Err(TollgateError::transfer(format!(
                    "transfer {} did not resolve after {} polls",
                    resource.transfer_id, self.poll_attempts
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
            resource = self.get_transfer(&resource.transfer_id).await?;
            attempts += 1;
        }

        match resource.status {
            TransferStatus::Complete => resource.transaction_hash.ok_or_else(|| {
                TollgateError::transfer(format!(
                    "transfer {} completed without a transaction hash",
                    resource.transfer_id
                ))
            }),
            TransferStatus::Failed => {
                let reason = resource
                    .failure_reason
                    .unwrap_or_else(|| "no reason given".to_string());
                warn!(transfer_id = %resource.transfer_id, reason = %reason, "transfer failed");
                Err(TollgateError::transfer(format!("transfer failed: {reason}")))
            }
            // is_terminal() excludes these.
            TransferStatus::Pending | TransferStatus::Broadcast => Err(
                TollgateError::Internal("non-terminal transfer after polling".to_string()),
            ),
        }
    }

    async fn create_transfer(
        &self,
        request: &CreateTransferRequest,
    ) -> Result<TransferResource, TollgateError> {
        let url = format!("{}/v1/transfers", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| TollgateError::Transfer {
                message: format!("transfer request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        Self::parse_transfer_response(response).await
    }

    async fn get_transfer(&self, transfer_id: &str) -> Result<TransferResource, TollgateError> {
        let url = format!("{}/v1/transfers/{transfer_id}", self.base_url);
        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| TollgateError::Transfer {
                    message: format!("transfer status request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

        Self::parse_transfer_response(response).await
    }

    async fn parse_transfer_response(
        response: reqwest::Response,
    ) -> Result<TransferResource, TollgateError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(TollgateError::transfer(format!(
                "facilitator returned {status}: {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| TollgateError::Transfer {
            message: format!("failed to parse facilitator response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_against(server: &MockServer, api_key: Option<&str>) -> FacilitatorClient {
        FacilitatorClient::new(
            &server.uri(),
            api_key,
            Duration::from_millis(10),
            3,
        )
        .unwrap()
    }

    fn transfer_request() -> CreateTransferRequest {
        CreateTransferRequest {
            amount: 0.001,
            asset_id: "usdc".into(),
            source_id: "consumer-1".into(),
            destination_id: "provider-1".into(),
            gasless: false,
        }
    }

    #[tokio::test]
    async fn immediate_completion_returns_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/transfers"))
            .and(body_partial_json(serde_json::json!({
                "amount": 0.001,
                "asset_id": "usdc",
                "source_id": "consumer-1",
                "destination_id": "provider-1"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "transfer_id": "tr-1",
                "status": "complete",
                "transaction_hash": "0xabc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_against(&server, None);
        let hash = client.execute_transfer(&transfer_request()).await.unwrap();
        assert_eq!(hash, "0xabc");
    }

    #[tokio::test]
    async fn pending_transfer_is_polled_to_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/transfers"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "transfer_id": "tr-2",
                "status": "pending"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/transfers/tr-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "transfer_id": "tr-2",
                "status": "broadcast"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/transfers/tr-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "transfer_id": "tr-2",
                "status": "complete",
                "transaction_hash": "0xdef"
            })))
            .mount(&server)
            .await;

        let client = client_against(&server, None);
        let hash = client.execute_transfer(&transfer_request()).await.unwrap();
        assert_eq!(hash, "0xdef");
    }

    #[tokio::test]
    async fn failed_transfer_surfaces_the_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/transfers"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "transfer_id": "tr-3",
                "status": "failed",
                "failure_reason": "insufficient funds"
            })))
            .mount(&server)
            .await;

        let client = client_against(&server, None);
        let err = client
            .execute_transfer(&transfer_request())
            .await
            .unwrap_err();
        assert!(matches!(err, TollgateError::Transfer { .. }));
        assert!(err.to_string().contains("insufficient funds"));
    }

    #[tokio::test]
    async fn unresolved_transfer_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/transfers"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "transfer_id": "tr-4",
                "status": "pending"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/transfers/tr-4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "transfer_id": "tr-4",
                "status": "pending"
            })))
            .mount(&server)
            .await;

        let client = client_against(&server, None);
        let err = client
            .execute_transfer(&transfer_request())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("did not resolve"));
    }

    #[tokio::test]
    async fn api_key_is_sent_as_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/transfers"))
            .and(header("authorization", "Bearer sk-fac-1"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "transfer_id": "tr-5",
                "status": "complete",
                "transaction_hash": "0x5"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_against(&server, Some("sk-fac-1"));
        client.execute_transfer(&transfer_request()).await.unwrap();
    }

    #[tokio::test]
    async fn http_error_is_a_transfer_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/transfers"))
            .respond_with(ResponseTemplate::new(422).set_body_string("unknown asset"))
            .mount(&server)
            .await;

        let client = client_against(&server, None);
        let err = client
            .execute_transfer(&transfer_request())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("422"));
    }
}
