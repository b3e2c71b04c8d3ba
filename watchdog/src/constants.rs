//! Protocol constants and default values
//!
//! Central place for the JSON-RPC wire constants and the defaults used when
//! a configuration field is omitted.

/// JSON-RPC wire constants
pub mod rpc {
    /// Protocol version sent with every request
    pub const JSONRPC_VERSION: &str = "2.0";

    /// Request id; calls are strictly sequential so a fixed id is enough
    pub const REQUEST_ID: u64 = 1;

    pub const METHOD_BLOCK_NUMBER: &str = "eth_blockNumber";
    pub const METHOD_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";
    pub const METHOD_BLOCK_BY_HASH: &str = "eth_getBlockByHash";
}

/// Defaults applied by serde when a config field is missing
pub mod defaults {
    pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

    /// Steady-state interval between health checks
    pub const POLL_INTERVAL_SECONDS: u64 = 600;

    /// Wait applied when the reference endpoint is unavailable
    pub const BACKOFF_INTERVAL_SECONDS: u64 = 600;

    /// Blocks subtracted from the chain tip to stay clear of reorgs
    pub const BLOCK_OFFSET: u64 = 15;

    pub const RPC_TIMEOUT_SECONDS: u64 = 30;

    pub const RESTART_TIMEOUT_SECONDS: u64 = 120;

    pub const RESTART_COMMAND: [&str; 2] = ["docker", "restart"];
}

/// Alert delivery constants
pub mod alerts {
    /// Timeout for webhook delivery
    pub const WEBHOOK_TIMEOUT_SECONDS: u64 = 10;
}
