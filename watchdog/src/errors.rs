//! Error types for the watchdog
//!
//! Transport failures, malformed block numbers, restart failures and
//! configuration problems each get their own enum so call sites can react
//! to them differently. `WatchdogError` covers the ones that can stop the
//! monitor from starting.

use std::fmt;

/// Main error type for the watchdog
#[derive(Debug)]
pub enum WatchdogError {
    /// Configuration-related errors
    Config(ConfigError),

    /// JSON-RPC transport errors
    Rpc(RpcError),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

/// Transport-level failures of a JSON-RPC call.
///
/// An RPC-level `error` field in an otherwise valid response is NOT one of
/// these; `call_http` maps that to the "no result" sentinel instead.
#[derive(Debug)]
pub enum RpcError {
    /// Request did not complete within the configured timeout
    Timeout { url: String },

    /// TCP connection could not be established
    ConnectionFailed { url: String, reason: String },

    /// Endpoint answered with a non-success HTTP status
    HttpStatus { url: String, status: u16 },

    /// Body was not valid JSON
    InvalidResponse { url: String, reason: String },

    /// Any other request failure
    Request { url: String, reason: String },
}

/// Block number decoding error variants
#[derive(Debug, PartialEq, Eq)]
pub enum BlockNumberError {
    /// `result` was absent or not a string
    Missing,

    /// Value was not a `0x`-prefixed hex number
    InvalidHex { value: String },
}

/// Container restart error variants
#[derive(Debug)]
pub enum ContainerError {
    /// The restart command could not be started
    SpawnFailed { command: String, reason: String },

    /// The restart command exited with a failure status
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The restart command did not finish in time
    Timeout { command: String, seconds: u64 },
}

impl fmt::Display for WatchdogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchdogError::Config(e) => write!(f, "Configuration error: {}", e),
            WatchdogError::Rpc(e) => write!(f, "RPC error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcError::Timeout { url } => write!(f, "Request to {} timed out", url),
            RpcError::ConnectionFailed { url, reason } => {
                write!(f, "Connection to {} failed: {}", url, reason)
            }
            RpcError::HttpStatus { url, status } => {
                write!(f, "{} returned HTTP {}", url, status)
            }
            RpcError::InvalidResponse { url, reason } => {
                write!(f, "Invalid response from {}: {}", url, reason)
            }
            RpcError::Request { url, reason } => {
                write!(f, "Request to {} failed: {}", url, reason)
            }
        }
    }
}

impl fmt::Display for BlockNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockNumberError::Missing => write!(f, "Block number missing from response"),
            BlockNumberError::InvalidHex { value } => {
                write!(f, "Invalid hex block number '{}'", value)
            }
        }
    }
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::SpawnFailed { command, reason } => {
                write!(f, "Failed to run '{}': {}", command, reason)
            }
            ContainerError::CommandFailed {
                command,
                status,
                stderr,
            } => match status {
                Some(code) => write!(f, "'{}' exited with {}: {}", command, code, stderr),
                None => write!(f, "'{}' was terminated by a signal: {}", command, stderr),
            },
            ContainerError::Timeout { command, seconds } => {
                write!(f, "'{}' did not finish within {}s", command, seconds)
            }
        }
    }
}

impl std::error::Error for WatchdogError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for RpcError {}
impl std::error::Error for BlockNumberError {}
impl std::error::Error for ContainerError {}

impl From<ConfigError> for WatchdogError {
    fn from(err: ConfigError) -> Self {
        WatchdogError::Config(err)
    }
}

impl From<RpcError> for WatchdogError {
    fn from(err: RpcError) -> Self {
        WatchdogError::Rpc(err)
    }
}
