//! Ledger node REST client with timeout and error handling.
//!
//! # Responsibilities
//! - Fetch account modules and transaction records from the fullnode
//! - Handle timeouts and network errors gracefully
//! - Preserve the node's own error messages for user-visible reporting

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::timeout;

use crate::ledger::types::{LedgerError, LedgerResult, MoveModule, NodeConfig};

/// Read-only access to on-chain metadata.
///
/// The resolver and prediction dispatcher accept any implementation, so
/// tests substitute scripted doubles for the REST client.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Fetch the modules published at an account address.
    async fn fetch_modules(&self, address: &str) -> LedgerResult<Vec<MoveModule>>;

    /// Fetch a committed transaction record by hash.
    async fn fetch_transaction(&self, hash: &str) -> LedgerResult<serde_json::Value>;
}

/// Error body shape used by the fullnode REST API.
#[derive(Deserialize)]
struct NodeErrorBody {
    message: String,
}

/// REST client for the ledger fullnode.
///
/// Stateless request/response proxy: one instance is created at startup and
/// shared behind `Arc` across all requests.
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    config: NodeConfig,
    timeout_duration: Duration,
}

impl LedgerClient {
    /// Create a new ledger client.
    pub fn new(config: NodeConfig) -> Self {
        let timeout_duration = Duration::from_secs(config.request_timeout_secs);
        Self {
            http: reqwest::Client::new(),
            config,
            timeout_duration,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json(&self, url: String) -> LedgerResult<serde_json::Value> {
        let response = match timeout(self.timeout_duration, self.http.get(&url).send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(url = %url, error = %e, "Node request failed");
                return Err(LedgerError::Transport(e.to_string()));
            }
            Err(_) => {
                tracing::warn!(url = %url, "Node request timed out");
                return Err(LedgerError::Timeout(self.config.request_timeout_secs));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<NodeErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| {
                    if body.trim().is_empty() {
                        status.to_string()
                    } else {
                        body
                    }
                });
            tracing::debug!(url = %url, status = status.as_u16(), "Node returned error status");
            return Err(LedgerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))
    }
}

#[async_trait]
impl LedgerApi for LedgerClient {
    async fn fetch_modules(&self, address: &str) -> LedgerResult<Vec<MoveModule>> {
        let url = self.endpoint(&format!("accounts/{}/modules", address));
        let value = self.get_json(url).await?;
        serde_json::from_value(value).map_err(|e| LedgerError::Transport(e.to_string()))
    }

    async fn fetch_transaction(&self, hash: &str) -> LedgerResult<serde_json::Value> {
        let url = self.endpoint(&format!("transactions/by_hash/{}", hash));
        self.get_json(url).await
    }
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("base_url", &self.config.base_url)
            .field("timeout_secs", &self.config.request_timeout_secs)
            .finish()
    }
}
