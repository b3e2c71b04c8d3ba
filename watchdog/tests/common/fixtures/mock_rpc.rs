//! Mock JSON-RPC server for testing reference and light node interactions
//!
//! This simulates Ethereum-style JSON-RPC responses without a real node.
//! Mocks match on the request's `method` field so one server can answer
//! several methods.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, method},
    Mock, MockServer, ResponseTemplate,
};

/// Mock JSON-RPC server
pub struct MockRpcServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockRpcServer {
    /// Create a new mock RPC server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Answer `rpc_method` with an arbitrary JSON body
    pub async fn mock_body(&self, rpc_method: &str, body: Value) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `rpc_method` with `{"result": result}`
    pub async fn mock_result(&self, rpc_method: &str, result: Value) {
        self.mock_body(
            rpc_method,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": result
            }),
        )
        .await;
    }

    /// Mock `eth_blockNumber`
    pub async fn mock_block_number(&self, latest: &str) {
        self.mock_result("eth_blockNumber", json!(latest)).await;
    }

    /// Mock `eth_getBlockByNumber` for one specific block
    pub async fn mock_block_by_number(&self, number: &str, hash: &str) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "eth_getBlockByNumber",
                "params": [number, false]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "number": number,
                    "hash": hash
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock `eth_getBlockByHash` for one specific block
    pub async fn mock_block_by_hash(&self, hash: &str) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "eth_getBlockByHash",
                "params": [hash, false]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "hash": hash
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock an RPC-level error for `rpc_method`
    pub async fn mock_rpc_error(&self, rpc_method: &str) {
        self.mock_body(
            rpc_method,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {
                    "code": -32000,
                    "message": "header not found"
                }
            }),
        )
        .await;
    }

    /// Mock a slow endpoint (for timeout tests)
    pub async fn mock_delayed(&self, rpc_method: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": "0x64"}))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a non-JSON body
    pub async fn mock_malformed(&self, rpc_method: &str) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad gateway</html>"))
            .mount(&self.server)
            .await;
    }

    /// Mock an HTTP-level failure
    pub async fn mock_http_status(&self, rpc_method: &str, status: u16) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }

    /// `method` fields of every request received, in order
    pub async fn received_methods(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| request.body_json::<Value>().ok())
            .filter_map(|body| body["method"].as_str().map(str::to_string))
            .collect()
    }
}

/// A URL nothing is listening on
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("ephemeral port address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
