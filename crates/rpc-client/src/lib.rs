use crate::quantity::to_hex_quantity;
use async_trait::async_trait;
use configuration::settings::{RpcConfig, WatcherConfig};
use core_types::{ConfirmationReceipt, SubmitRequest, TxHash, WatchRequest};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::time::Instant;

pub mod error;
pub mod quantity;
pub mod responses;

// --- Public API ---
pub use error::RpcError;
pub use responses::{RawReceipt, RpcErrorObject};

/// The abstract interface for the component that signs and submits one
/// transaction, returning its identifier.
///
/// This trait is the contract the executor drives, allowing the underlying
/// implementation (a live wallet node or a mock) to be swapped out. The
/// request carries a base-10 string value; the chain and gas are the connected
/// wallet's concern.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn submit(&self, request: &SubmitRequest) -> Result<TxHash, RpcError>;
}

/// The abstract interface for the component that blocks until a submitted
/// transaction reaches the requested confirmation depth.
#[async_trait]
pub trait ConfirmationWatcher: Send + Sync {
    async fn wait_for_confirmation(
        &self,
        watch: &WatchRequest,
    ) -> Result<ConfirmationReceipt, RpcError>;
}

/// A concrete implementation of both collaborator traits over Ethereum
/// JSON-RPC.
///
/// Submission goes through `eth_sendTransaction` against a wallet-backed node
/// (the node holds the key and picks chain/gas). Confirmation polls
/// `eth_getTransactionReceipt` and `eth_blockNumber` until the requested depth
/// is reached, mapping a reverted status or a poll timeout to an error.
#[derive(Clone)]
pub struct JsonRpcClient {
    client: reqwest::Client,
    url: String,
    poll_interval: Duration,
    confirmation_timeout: Duration,
}

impl JsonRpcClient {
    pub fn new(rpc: &RpcConfig, watcher: &WatcherConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(rpc.request_timeout_secs))
                .build()
                .expect("Failed to build reqwest client"),
            url: rpc.url.clone(),
            poll_interval: Duration::from_millis(watcher.poll_interval_ms),
            confirmation_timeout: Duration::from_secs(watcher.confirmation_timeout_secs),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RpcError::Rpc {
                code: status.as_u16() as i64,
                message: text,
            });
        }

        let envelope: responses::RpcEnvelope = serde_json::from_str(&text)
            .map_err(|e| RpcError::Deserialization(format!("{e} in response to {method}")))?;

        if let Some(error) = envelope.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        serde_json::from_value(envelope.result)
            .map_err(|e| RpcError::Deserialization(format!("{e} in result of {method}")))
    }

    async fn head_block_number(&self) -> Result<u64, RpcError> {
        let head: String = self.call("eth_blockNumber", json!([])).await?;
        quantity::parse_hex_quantity(&head)
    }
}

#[async_trait]
impl Broadcaster for JsonRpcClient {
    async fn submit(&self, request: &SubmitRequest) -> Result<TxHash, RpcError> {
        let params = json!([{
            "to": request.to,
            "value": to_hex_quantity(&request.value)?,
            "data": request.data,
        }]);

        tracing::debug!(to = %request.to, value = %request.value, "submitting transaction");
        let hash: String = self.call("eth_sendTransaction", params).await?;
        tracing::info!(%hash, "transaction accepted by node");
        Ok(TxHash(hash))
    }
}

#[async_trait]
impl ConfirmationWatcher for JsonRpcClient {
    async fn wait_for_confirmation(
        &self,
        watch: &WatchRequest,
    ) -> Result<ConfirmationReceipt, RpcError> {
        let started = Instant::now();

        loop {
            let raw: Option<RawReceipt> = self
                .call("eth_getTransactionReceipt", json!([watch.hash.0]))
                .await?;

            if let Some(raw) = raw {
                let receipt = raw.into_receipt()?;
                if !receipt.status {
                    return Err(RpcError::Reverted(watch.hash.clone()));
                }

                let head = self.head_block_number().await?;
                let depth = head.saturating_sub(receipt.block_number) + 1;
                if depth >= watch.confirmations {
                    tracing::info!(hash = %watch.hash, block = receipt.block_number, depth, "transaction confirmed");
                    return Ok(receipt);
                }
                tracing::debug!(hash = %watch.hash, depth, wanted = watch.confirmations, "waiting for depth");
            } else {
                tracing::debug!(hash = %watch.hash, "receipt not yet available");
            }

            if started.elapsed() >= self.confirmation_timeout {
                return Err(RpcError::ConfirmationTimeout {
                    hash: watch.hash.clone(),
                    waited_secs: started.elapsed().as_secs(),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
