// File: watchdog/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use watchdog::config::manager::CONFIG_PATH_ENV;
use watchdog::{AlertService, ConfigManager, HealthMonitor};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("watchdog=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting light node watchdog");

    let config_path = ConfigManager::resolve_path(
        std::env::args().nth(1),
        std::env::var(CONFIG_PATH_ENV).ok(),
    );
    let config_manager = ConfigManager::new(&config_path).await.map_err(|e| {
        error!("{}", e);
        e
    })?;
    let config = config_manager.get_current_config();
    info!("Configuration loaded from {}", config_manager.path().display());

    let alert_service = Arc::new(AlertService::new(config.alarm_webhook_url.clone())?);
    if alert_service.is_enabled() {
        info!(
            "Alert service enabled with webhook: {}",
            alert_service.get_webhook_url()
        );
    } else {
        warn!("Alert service disabled, set 'alarm_webhook_url' to be notified of restarts");
    }

    let health_monitor = HealthMonitor::new(config, alert_service)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let cycles = health_monitor.run(shutdown_rx).await;
    info!("Watchdog exiting after {} health check cycles", cycles);

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping health monitor");
}
