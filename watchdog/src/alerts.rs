// File: watchdog/src/alerts.rs
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::redact_url;
use crate::constants::alerts::WEBHOOK_TIMEOUT_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertSeverity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertPayload {
    pub timestamp: DateTime<Utc>,
    pub severity: AlertSeverity,
    pub container: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Webhook notifications for remediation events. Disabled when no URL is set.
pub struct AlertService {
    webhook_url: Option<String>,
    client: Client,
}

impl AlertService {
    pub fn new(webhook_url: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client for AlertService: {}", e))?;

        Ok(Self {
            webhook_url: webhook_url.filter(|url| !url.trim().is_empty()),
            client,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Webhook URL with any credential removed, for logging
    pub fn get_webhook_url(&self) -> String {
        self.webhook_url
            .as_deref()
            .map(redact_url)
            .unwrap_or_default()
    }

    /// Notify that the container was restarted (or that the restart failed)
    pub async fn alert_restart(
        &self,
        container: &str,
        reason: &str,
        restart_error: Option<&str>,
    ) -> Result<()> {
        let (severity, message) = match restart_error {
            None => (
                AlertSeverity::Warning,
                format!("Light node unhealthy, container {} restarted", container),
            ),
            Some(_) => (
                AlertSeverity::Critical,
                format!("Light node unhealthy, restart of container {} FAILED", container),
            ),
        };

        let payload = AlertPayload {
            timestamp: Utc::now(),
            severity,
            container: container.to_string(),
            message,
            details: Some(serde_json::json!({
                "reason": reason,
                "restart_error": restart_error,
            })),
        };

        self.send(&payload).await
    }

    async fn send(&self, payload: &AlertPayload) -> Result<()> {
        let url = match &self.webhook_url {
            Some(url) => url,
            None => {
                debug!("Alert service disabled, skipping: {}", payload.message);
                return Ok(());
            }
        };

        let response = timeout(
            Duration::from_secs(WEBHOOK_TIMEOUT_SECONDS),
            self.client.post(url).json(payload).send(),
        )
        .await
        .map_err(|_| anyhow!("Webhook request timeout"))?
        .map_err(|e| anyhow!("Webhook request failed: {}", e.without_url()))?;

        if !response.status().is_success() {
            warn!(
                "Webhook {} returned HTTP {}",
                redact_url(url),
                response.status()
            );
            return Err(anyhow!("Webhook returned HTTP {}", response.status()));
        }

        info!("Alert sent: {}", payload.message);
        Ok(())
    }
}
