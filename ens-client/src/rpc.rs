//! JSON-RPC transport for [`ContractCaller`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy::primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use ens_core::error::{EnsError, Result};
use ens_core::traits::ContractCaller;

use crate::config::EnsConfig;

/// Contract caller speaking Ethereum JSON-RPC over HTTP.
///
/// Reads go through `eth_call` against the latest block. Writes go through
/// `eth_sendTransaction`, so the node must manage the configured sender's key.
pub struct HttpCaller {
    http_client: reqwest::Client,
    rpc_url: String,
    from: Option<Address>,
    next_id: AtomicU64,
}

impl HttpCaller {
    /// Creates a caller for the node in `config`.
    pub fn new(config: &EnsConfig) -> Result<Self> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| EnsError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            rpc_url: config.rpc_url.clone(),
            from: config.from,
            next_id: AtomicU64::new(1),
        })
    }

    /// The RPC endpoint this caller talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EnsError::ExternalCall(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnsError::ExternalCall(format!(
                "{} returned HTTP {}",
                method, status
            )));
        }

        let mut body: Value = response
            .json()
            .await
            .map_err(|e| EnsError::ExternalCall(format!("{} response unreadable: {}", method, e)))?;

        if let Some(error) = body.get("error") {
            warn!(method, error = %error, "JSON-RPC error");
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| error.to_string());
            return Err(EnsError::ExternalCall(format!("{}: {}", method, message)));
        }

        match body.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(EnsError::ExternalCall(format!("{} response has no result", method))),
        }
    }
}

fn hex_data(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

fn result_str(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| EnsError::ExternalCall(format!("expected hex string result, got {}", value)))
}

#[async_trait]
impl ContractCaller for HttpCaller {
    #[instrument(skip(self, data), fields(len = data.len()))]
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let params = json!([{ "to": to.to_string(), "data": hex_data(&data) }, "latest"]);
        let result = self.request("eth_call", params).await?;
        let text = result_str(&result)?;

        let raw = text.strip_prefix("0x").unwrap_or(text);
        let bytes = hex::decode(raw)
            .map_err(|e| EnsError::ExternalCall(format!("eth_call returned bad hex: {}", e)))?;
        debug!(returned = bytes.len(), "eth_call complete");
        Ok(bytes.into())
    }

    #[instrument(skip(self, data), fields(len = data.len()))]
    async fn send(&self, to: Address, data: Bytes) -> Result<B256> {
        let from = self.from.ok_or_else(|| {
            EnsError::Config("a sender address is required for state-changing calls".into())
        })?;

        let params = json!([{
            "from": from.to_string(),
            "to": to.to_string(),
            "data": hex_data(&data),
        }]);
        let result = self.request("eth_sendTransaction", params).await?;
        let hash = result_str(&result)?
            .parse::<B256>()
            .map_err(|e| EnsError::ExternalCall(format!("bad transaction hash: {}", e)))?;
        debug!(tx = %hash, "Transaction submitted");
        Ok(hash)
    }
}
