// File: watchdog/src/health/monitor.rs
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use super::types::{CheckOutcome, CheckStage, LocalFailure};
use crate::alerts::AlertService;
use crate::config::{redact_url, Config};
use crate::constants::rpc::{METHOD_BLOCK_BY_HASH, METHOD_BLOCK_BY_NUMBER, METHOD_BLOCK_NUMBER};
use crate::container::ContainerController;
use crate::errors::WatchdogError;
use crate::rpc::{block_hash, block_number_result, target_block_number, JsonRpcClient};

/// Compares the local light node against the reference endpoint and
/// restarts the local node's container when it fails the comparison.
pub struct HealthMonitor {
    config: Arc<Config>,
    rpc: JsonRpcClient,
    container: ContainerController,
    alert_service: Arc<AlertService>,
    last_check: Mutex<Option<DateTime<Utc>>>,
}

struct ReferenceBlock {
    number: String,
    hash: String,
}

impl HealthMonitor {
    pub fn new(config: Arc<Config>, alert_service: Arc<AlertService>) -> Result<Self, WatchdogError> {
        let rpc = JsonRpcClient::new(config.rpc_timeout())?;
        let container = ContainerController::new(&config.restart_command, config.restart_timeout());

        Ok(Self {
            config,
            rpc,
            container,
            alert_service,
            last_check: Mutex::new(None),
        })
    }

    /// Start time of the most recent check cycle
    pub async fn last_check(&self) -> Option<DateTime<Utc>> {
        *self.last_check.lock().await
    }

    /// Run check cycles until `shutdown` flips to true or its sender is
    /// dropped. Returns the number of completed cycles.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut cycles = 0u64;

        info!(
            "Watching container '{}': local {} against reference {}",
            self.config.container_name,
            redact_url(&self.config.local_rpc_url),
            redact_url(&self.config.reference_rpc_url)
        );

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            let outcome = self.check_once().await;
            cycles += 1;

            let delay = outcome.next_delay(&self.config);
            let started = self.last_check().await.unwrap_or_else(Utc::now);
            debug!(
                "Health check cycle #{} started {} done, next in {}s",
                cycles,
                started.to_rfc3339(),
                delay.as_secs()
            );

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!("Health monitor stopped after {} cycles", cycles);
        cycles
    }

    /// One health check cycle
    pub async fn check_once(&self) -> CheckOutcome {
        *self.last_check.lock().await = Some(Utc::now());

        let reference = match self.fetch_reference_block().await {
            Ok(reference) => reference,
            Err((stage, reason)) => {
                warn!(
                    "Reference endpoint unavailable at {} step: {}. Backing off {}s",
                    stage, reason, self.config.backoff_interval_seconds
                );
                return CheckOutcome::ReferenceUnavailable { stage, reason };
            }
        };

        let local = self
            .rpc
            .call(
                &self.config.local_rpc_url,
                METHOD_BLOCK_BY_HASH,
                vec![json!(reference.hash), json!(false)],
            )
            .await;

        let failure = match local {
            Ok(Some(response)) if !response["result"].is_null() => {
                match block_hash(&response) {
                    Some(local_hash) if local_hash.eq_ignore_ascii_case(&reference.hash) => {}
                    other => warn!(
                        "Local node returned hash {:?} for requested block {}",
                        other, reference.hash
                    ),
                }
                info!(
                    "Local node healthy at block {} ({}): {}",
                    reference.number, reference.hash, response
                );
                return CheckOutcome::Healthy {
                    block_number: reference.number,
                    block_hash: reference.hash,
                    local_response: response,
                };
            }
            Ok(Some(_)) => LocalFailure::NullResult,
            Ok(None) => LocalFailure::RpcError,
            Err(e) => LocalFailure::Transport(e.to_string()),
        };

        self.remediate(reference.hash, failure).await
    }

    async fn fetch_reference_block(&self) -> Result<ReferenceBlock, (CheckStage, String)> {
        let url = &self.config.reference_rpc_url;

        let latest = match self.rpc.call(url, METHOD_BLOCK_NUMBER, vec![]).await {
            Ok(Some(response)) => response,
            Ok(None) => {
                return Err((
                    CheckStage::LatestBlockNumber,
                    "RPC error response".to_string(),
                ))
            }
            Err(e) => return Err((CheckStage::LatestBlockNumber, e.to_string())),
        };

        let number = block_number_result(&latest)
            .and_then(|hex| target_block_number(hex, self.config.block_offset))
            .map_err(|e| (CheckStage::LatestBlockNumber, e.to_string()))?;

        debug!("Latest reference block {}, checking {}", latest["result"], number);

        let block = match self
            .rpc
            .call(url, METHOD_BLOCK_BY_NUMBER, vec![json!(number), json!(false)])
            .await
        {
            Ok(Some(response)) => response,
            Ok(None) => {
                return Err((
                    CheckStage::ReferenceBlock,
                    "RPC error response".to_string(),
                ))
            }
            Err(e) => return Err((CheckStage::ReferenceBlock, e.to_string())),
        };

        let hash = block_hash(&block)
            .ok_or_else(|| {
                (
                    CheckStage::ReferenceBlock,
                    format!("block {} has no hash", number),
                )
            })?
            .to_string();

        Ok(ReferenceBlock { number, hash })
    }

    async fn remediate(&self, block_hash: String, failure: LocalFailure) -> CheckOutcome {
        let container_name = &self.config.container_name;
        error!(
            "Local node unhealthy for block {}: {}. Restarting container {}",
            block_hash, failure, container_name
        );

        let restart_error = match self.container.restart(container_name).await {
            Ok(_) => None,
            Err(e) => {
                error!("Failed to restart container {}: {}", container_name, e);
                Some(e.to_string())
            }
        };

        if self.alert_service.is_enabled() {
            if let Err(e) = self
                .alert_service
                .alert_restart(container_name, &failure.to_string(), restart_error.as_deref())
                .await
            {
                error!("Failed to send restart alert: {}", e);
            }
        }

        CheckOutcome::Remediated {
            block_hash,
            failure,
            restart_succeeded: restart_error.is_none(),
        }
    }
}
