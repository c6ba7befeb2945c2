//! HTTP relay client.
//!
//! The relay service sponsors withdrawal gas. The protocol only needs one
//! endpoint: `POST {base}/tokens/{token}/relay?chainId={id}` with the
//! withdrawal payload as JSON.

use alloy_primitives::Address;
use async_trait::async_trait;

use cloak_core::error::{CloakError, Result};
use cloak_core::traits::RelayClient;
use cloak_core::types::WithdrawalRequest;

/// Relay client over HTTP.
#[derive(Clone, Debug)]
pub struct HttpRelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRelayClient {
    /// Creates a client for the given relay base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn relay(
        &self,
        token: Address,
        chain_id: u64,
        request: &WithdrawalRequest,
    ) -> Result<serde_json::Value> {
        let url = format!(
            "{}/tokens/{:#x}/relay?chainId={}",
            self.base_url, token, chain_id
        );
        tracing::debug!(url = %url, nonce = %request.nonce, "submitting withdrawal to relay");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| CloakError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CloakError::RelayRejected(format!("{status}: {body}")));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CloakError::NetworkFailure(e.to_string()))
    }
}
