use gas_estimate::{RawFeeHistory, U256};
use reqwest::{header, Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Ethereum JSON-RPC configuration
#[derive(Debug, Clone)]
pub struct EthRpcConfig {
    pub url: String,
    /// Upper bound for a single provider request
    pub timeout: Duration,
}

/// Ethereum JSON-RPC error types
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Provider returned HTTP status {0}")]
    HttpStatus(u16),

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Invalid response format")]
    InvalidResponse,

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Ethereum JSON-RPC client over HTTP
pub struct EthRpcClient {
    client: Client,
    url: Url,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorResponse>,
}

#[derive(Deserialize)]
struct RpcErrorResponse {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct BlockHeader {
    number: Option<U256>,
}

impl EthRpcClient {
    /// Creates a client for the configured endpoint.
    ///
    /// Only `http` and `https` endpoints are supported. No request is sent.
    pub fn connect(config: &EthRpcConfig) -> Result<Self, RpcError> {
        let url = Url::parse(&config.url)
            .map_err(|e| RpcError::InvalidUrl(format!("{}: {e}", config.url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(RpcError::InvalidUrl(format!(
                "{}: unsupported scheme `{}`",
                config.url,
                url.scheme()
            )));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    /// Number of the most recent block (`eth_getBlockByNumber("latest")`)
    pub async fn latest_block_number(&self) -> Result<U256, RpcError> {
        let result = self
            .call("eth_getBlockByNumber", json!(["latest", false]))
            .await?;

        let header: BlockHeader = serde_json::from_value(result)?;
        let number = header
            .number
            .ok_or_else(|| RpcError::MissingField("number".to_string()))?;

        debug!("Latest block number: {}", number);
        Ok(number)
    }

    /// Fee history for `block_count` blocks ending at `newest_block`
    pub async fn fee_history(
        &self,
        block_count: u64,
        newest_block: U256,
        percentiles: &[f64],
    ) -> Result<RawFeeHistory, RpcError> {
        let params = json!([format!("{block_count:#x}"), newest_block, percentiles]);
        let result = self.call("eth_feeHistory", params).await?;

        let history: RawFeeHistory = serde_json::from_value(result)?;
        debug!(
            "Fetched fee history from block {} with {} reward rows",
            history.oldest_block,
            history.reward.len()
        );
        Ok(history)
    }

    async fn call(&self, method: &'static str, params: Value) -> Result<Value, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!("Sending {} to {}", method, self.url);

        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            error!("{} failed with status: {}", method, response.status());
            return Err(RpcError::HttpStatus(response.status().as_u16()));
        }

        let body: RpcResponse = response.json().await?;

        if let Some(error) = body.error {
            error!("{} returned RPC error {}: {}", method, error.code, error.message);
            return Err(RpcError::RpcError {
                code: error.code,
                message: error.message,
            });
        }

        body.result.ok_or(RpcError::InvalidResponse)
    }
}
