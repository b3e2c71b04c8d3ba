//! Health check outcome types

use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::config::Config;

/// Reference-side step of a check cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    LatestBlockNumber,
    ReferenceBlock,
}

/// Why the local node was judged unhealthy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalFailure {
    /// Response carried a non-null `error`
    RpcError,
    /// Response had a null `result`; the node does not know the block
    NullResult,
    /// Timeout, refused connection, bad status or unparseable body
    Transport(String),
}

/// Result of a single check cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Healthy {
        block_number: String,
        block_hash: String,
        local_response: Value,
    },
    ReferenceUnavailable {
        stage: CheckStage,
        reason: String,
    },
    Remediated {
        block_hash: String,
        failure: LocalFailure,
        restart_succeeded: bool,
    },
}

impl CheckOutcome {
    /// Reference failures back off; everything else waits a normal poll interval
    pub fn next_delay(&self, config: &Config) -> Duration {
        match self {
            CheckOutcome::ReferenceUnavailable { .. } => config.backoff_interval(),
            CheckOutcome::Healthy { .. } | CheckOutcome::Remediated { .. } => {
                config.poll_interval()
            }
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, CheckOutcome::Healthy { .. })
    }

    pub fn restart_attempted(&self) -> bool {
        matches!(self, CheckOutcome::Remediated { .. })
    }
}

impl fmt::Display for CheckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStage::LatestBlockNumber => write!(f, "latest block number"),
            CheckStage::ReferenceBlock => write!(f, "reference block"),
        }
    }
}

impl fmt::Display for LocalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalFailure::RpcError => write!(f, "local node returned an RPC error"),
            LocalFailure::NullResult => write!(f, "local node does not have the block"),
            LocalFailure::Transport(reason) => write!(f, "local node unreachable: {}", reason),
        }
    }
}
