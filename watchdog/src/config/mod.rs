// File: watchdog/src/config/mod.rs
pub mod manager;
use crate::constants::defaults;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::time::Duration;
pub use manager::ConfigManager;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Trusted endpoint; may carry an access key in the URL
    pub reference_rpc_url: String,
    #[serde(default = "default_local_rpc_url")]
    pub local_rpc_url: String,
    pub container_name: String,
    /// Program and leading arguments; the container name is appended
    #[serde(default = "default_restart_command")]
    pub restart_command: Vec<String>,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    #[serde(default = "default_backoff_interval")]
    pub backoff_interval_seconds: u64,
    #[serde(default = "default_block_offset")]
    pub block_offset: u64,
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_seconds: u64,
    #[serde(default = "default_restart_timeout")]
    pub restart_timeout_seconds: u64,
    pub alarm_webhook_url: Option<String>,
}

fn default_local_rpc_url() -> String {
    defaults::LOCAL_RPC_URL.to_string()
}

fn default_restart_command() -> Vec<String> {
    defaults::RESTART_COMMAND
        .iter()
        .map(|part| part.to_string())
        .collect()
}

fn default_poll_interval() -> u64 {
    defaults::POLL_INTERVAL_SECONDS
}

fn default_backoff_interval() -> u64 {
    defaults::BACKOFF_INTERVAL_SECONDS
}

fn default_block_offset() -> u64 {
    defaults::BLOCK_OFFSET
}

fn default_rpc_timeout() -> u64 {
    defaults::RPC_TIMEOUT_SECONDS
}

fn default_restart_timeout() -> u64 {
    defaults::RESTART_TIMEOUT_SECONDS
}

impl Config {
    /// Config with every optional field at its default
    pub fn new(reference_rpc_url: impl Into<String>, container_name: impl Into<String>) -> Self {
        Self {
            reference_rpc_url: reference_rpc_url.into(),
            local_rpc_url: default_local_rpc_url(),
            container_name: container_name.into(),
            restart_command: default_restart_command(),
            poll_interval_seconds: default_poll_interval(),
            backoff_interval_seconds: default_backoff_interval(),
            block_offset: default_block_offset(),
            rpc_timeout_seconds: default_rpc_timeout(),
            restart_timeout_seconds: default_restart_timeout(),
            alarm_webhook_url: None,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn backoff_interval(&self) -> Duration {
        Duration::from_secs(self.backoff_interval_seconds)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }

    pub fn restart_timeout(&self) -> Duration {
        Duration::from_secs(self.restart_timeout_seconds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("reference_rpc_url", &self.reference_rpc_url)?;
        validate_url("local_rpc_url", &self.local_rpc_url)?;

        if self.container_name.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "container_name".to_string(),
            });
        }

        match self.restart_command.first() {
            Some(program) if !program.trim().is_empty() => {}
            _ => {
                return Err(ConfigError::InvalidValue {
                    field: "restart_command".to_string(),
                    reason: "must name a program to run".to_string(),
                })
            }
        }

        if self.poll_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.backoff_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff_interval_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.rpc_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rpc_timeout_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.restart_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "restart_timeout_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if let Some(url) = &self.alarm_webhook_url {
            if !url.is_empty() {
                validate_url("alarm_webhook_url", url)?;
            }
        }

        Ok(())
    }
}

fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.trim().is_empty() {
        return Err(ConfigError::MissingRequired {
            field: field.to_string(),
        });
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("'{}' is not an http(s) URL", redact_url(url)),
        });
    }
    Ok(())
}

/// Strip the path, query and userinfo from a URL before it is logged.
///
/// Hosted RPC providers put the access key in the path, so only the scheme
/// and host survive: `https://mainnet.example.io/v3/KEY` becomes
/// `https://mainnet.example.io/***`.
pub fn redact_url(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => return "***".to_string(),
    };

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let has_secret = authority.contains('@') || rest.len() > authority.len() + 1;

    if has_secret {
        format!("{}://{}/***", scheme, host)
    } else {
        format!("{}://{}", scheme, host)
    }
}
