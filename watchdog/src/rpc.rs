//! JSON-RPC 2.0 client and block number helpers
//!
//! `call_http` is the single place that talks HTTP. It separates two kinds of
//! failure: an RPC-level `error` field becomes the `None` sentinel, while
//! transport problems are returned as `RpcError` for the caller to handle.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::redact_url;
use crate::constants::rpc::{JSONRPC_VERSION, REQUEST_ID};
use crate::errors::{BlockNumberError, RpcError};

pub struct JsonRpcClient {
    client: Client,
    timeout: Duration,
}

impl JsonRpcClient {
    pub fn new(request_timeout: Duration) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| RpcError::Request {
                url: String::new(),
                reason: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            timeout: request_timeout,
        })
    }

    /// Build a request object for `method`
    pub fn build_request(method: &str, params: Vec<Value>) -> Value {
        json!({
            "jsonrpc": JSONRPC_VERSION,
            "method": method,
            "params": params,
            "id": REQUEST_ID
        })
    }

    /// POST `payload` to `url` and parse the body as JSON.
    ///
    /// Returns `Ok(None)` when the response carries a non-null `error`,
    /// otherwise the parsed response unchanged.
    pub async fn call_http(&self, url: &str, payload: &Value) -> Result<Option<Value>, RpcError> {
        let safe_url = redact_url(url);
        debug!("POST {} {}", safe_url, payload["method"]);

        let response = timeout(self.timeout, self.client.post(url).json(payload).send())
            .await
            .map_err(|_| RpcError::Timeout {
                url: safe_url.clone(),
            })?
            .map_err(|e| classify_request_error(&safe_url, e))?;

        if !response.status().is_success() {
            return Err(RpcError::HttpStatus {
                url: safe_url,
                status: response.status().as_u16(),
            });
        }

        let body = timeout(self.timeout, response.text())
            .await
            .map_err(|_| RpcError::Timeout {
                url: safe_url.clone(),
            })?
            .map_err(|e| classify_request_error(&safe_url, e))?;

        let parsed: Value =
            serde_json::from_str(&body).map_err(|e| RpcError::InvalidResponse {
                url: safe_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(take_result(&safe_url, parsed))
    }

    /// Build a request for `method` and send it with `call_http`
    pub async fn call(
        &self,
        url: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Option<Value>, RpcError> {
        let payload = Self::build_request(method, params);
        self.call_http(url, &payload).await
    }
}

/// Apply the sentinel rule to a parsed response
pub fn take_result(url: &str, response: Value) -> Option<Value> {
    match response.get("error") {
        Some(error) if !error.is_null() => {
            warn!("RPC error from {}: {}", url, error);
            None
        }
        _ => Some(response),
    }
}

/// reqwest's Display appends the full request URL, which may carry the
/// access key; it is stripped before the error is formatted.
fn classify_request_error(url: &str, err: reqwest::Error) -> RpcError {
    let err = err.without_url();
    if err.is_timeout() {
        RpcError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_connect() {
        RpcError::ConnectionFailed {
            url: url.to_string(),
            reason: err.to_string(),
        }
    } else if err.is_decode() {
        RpcError::InvalidResponse {
            url: url.to_string(),
            reason: err.to_string(),
        }
    } else {
        RpcError::Request {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Decode a `0x`-prefixed hex quantity
pub fn decode_block_number(value: &str) -> Result<u64, BlockNumberError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .filter(|d| !d.is_empty())
        .ok_or_else(|| BlockNumberError::InvalidHex {
            value: value.to_string(),
        })?;

    u64::from_str_radix(digits, 16).map_err(|_| BlockNumberError::InvalidHex {
        value: value.to_string(),
    })
}

pub fn encode_block_number(number: u64) -> String {
    format!("{:#x}", number)
}

/// Block number `offset` blocks behind `latest`, hex encoded.
/// Saturates at genesis.
pub fn target_block_number(latest: &str, offset: u64) -> Result<String, BlockNumberError> {
    let latest = decode_block_number(latest)?;
    Ok(encode_block_number(latest.saturating_sub(offset)))
}

/// Extract the hex `result` of an `eth_blockNumber` response
pub fn block_number_result(response: &Value) -> Result<&str, BlockNumberError> {
    response["result"]
        .as_str()
        .ok_or(BlockNumberError::Missing)
}

/// Extract `result.hash` from a block response
pub fn block_hash(response: &Value) -> Option<&str> {
    response["result"]["hash"].as_str()
}
