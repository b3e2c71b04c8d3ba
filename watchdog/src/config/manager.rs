// File: watchdog/src/config/manager.rs
use super::{redact_url, Config};
use crate::errors::ConfigError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/watchdog.toml";
pub const CONFIG_PATH_ENV: &str = "WATCHDOG_CONFIG";

pub struct ConfigManager {
    path: PathBuf,
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let config = Self::load_configuration(&path).await?;
        Ok(Self {
            path,
            current_config: Arc::new(config),
        })
    }

    /// First CLI argument, then `WATCHDOG_CONFIG`, then the default path
    pub fn resolve_path(cli_arg: Option<String>, env_value: Option<String>) -> PathBuf {
        cli_arg
            .or(env_value)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    async fn load_configuration(path: &Path) -> Result<Config, ConfigError> {
        debug!("Loading watchdog config: {}", path.display());

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let config = Self::parse(&content)?;

        info!(
            "Loaded config: reference {}, local {}, container '{}', poll {}s, backoff {}s, offset {} blocks",
            redact_url(&config.reference_rpc_url),
            redact_url(&config.local_rpc_url),
            config.container_name,
            config.poll_interval_seconds,
            config.backoff_interval_seconds,
            config.block_offset
        );

        Ok(config)
    }
}
