//! Test configuration builder

use std::sync::Arc;
use watchdog::Config;

pub const TEST_CONTAINER: &str = "light-node";

pub struct TestConfigBuilder {
    config: Config,
}

impl TestConfigBuilder {
    pub fn new(reference_rpc_url: &str, local_rpc_url: &str) -> Self {
        let mut config = Config::new(reference_rpc_url, TEST_CONTAINER);
        config.local_rpc_url = local_rpc_url.to_string();
        config.rpc_timeout_seconds = 1;
        config.restart_timeout_seconds = 5;
        Self { config }
    }

    pub fn restart_command(mut self, command: Vec<String>) -> Self {
        self.config.restart_command = command;
        self
    }

    pub fn intervals(mut self, poll_seconds: u64, backoff_seconds: u64) -> Self {
        self.config.poll_interval_seconds = poll_seconds;
        self.config.backoff_interval_seconds = backoff_seconds;
        self
    }

    pub fn block_offset(mut self, offset: u64) -> Self {
        self.config.block_offset = offset;
        self
    }

    pub fn webhook(mut self, url: &str) -> Self {
        self.config.alarm_webhook_url = Some(url.to_string());
        self
    }

    pub fn build(self) -> Arc<Config> {
        Arc::new(self.config)
    }
}
