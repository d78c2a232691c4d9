//! Client implementation for the Vault seal endpoints.
//!
//! Only the two unauthenticated endpoints the agent needs are covered:
//! `sys/seal-status` and `sys/unseal`.

use crate::interface::VaultInterface;
use crate::vault::{SealStatus, VaultError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const SEAL_STATUS_PATH: &str = "/v1/sys/seal-status";
pub const UNSEAL_PATH: &str = "/v1/sys/unseal";

/// Body of a `sys/unseal` request.
#[derive(Serialize)]
struct UnsealRequest<'a> {
    key: &'a str,
}

/// Client for the Vault seal HTTP API.
pub struct VaultClient {
    /// Base URL of the Vault server
    pub addr: String,
    /// HTTP client for making requests
    client: Client,
}

impl VaultClient {
    /// Creates a new VaultClient for the specified address.
    pub fn new(addr: &str) -> Result<Self, VaultError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(VaultError::Client)?;

        Ok(Self {
            addr: addr.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Reads the seal status. The HTTP status code is not inspected; a body
    /// that does not decode as a [`SealStatus`] is a [`VaultError::Decode`].
    pub async fn get_seal_status(&self) -> Result<SealStatus, VaultError> {
        let url = self.url(SEAL_STATUS_PATH);
        debug!("Requesting Vault status from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(VaultError::Transport)?;

        let body = response.bytes().await.map_err(VaultError::Body)?;
        let status = SealStatus::from_slice(&body)?;

        debug!(
            "Vault status: sealed={}, progress={}",
            status.sealed, status.progress
        );
        Ok(status)
    }

    /// Submits a single key share. Succeeds once the vault answered,
    /// whatever the answer was.
    pub async fn put_unseal_key(&self, key: &str) -> Result<(), VaultError> {
        let request = self
            .client
            .put(self.url(UNSEAL_PATH))
            .json(&UnsealRequest { key })
            .build()
            .map_err(VaultError::Request)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(VaultError::Transport)?;

        // Drain the body so the connection can be reused.
        let status = response.status();
        if let Err(e) = response.bytes().await {
            debug!("Discarding unreadable unseal response ({}): {}", status, e);
        }
        debug!("Unseal request answered with {}", status);
        Ok(())
    }
}

#[async_trait]
impl VaultInterface for VaultClient {
    async fn seal_status(&self) -> Result<SealStatus, VaultError> {
        self.get_seal_status().await
    }

    async fn submit_unseal_key(&self, key: &str) -> Result<(), VaultError> {
        self.put_unseal_key(key).await
    }
}
