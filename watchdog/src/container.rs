use std::time::Duration;
use tokio::process::Command as AsyncCommand;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::errors::ContainerError;

/// Restarts the local node's container through an external command
pub struct ContainerController {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ContainerController {
    /// `command` is the program followed by its leading arguments, for
    /// example `["docker", "restart"]`.
    pub fn new(command: &[String], restart_timeout: Duration) -> Self {
        let (program, args) = match command.split_first() {
            Some((program, args)) => (program.clone(), args.to_vec()),
            None => (String::new(), Vec::new()),
        };

        Self {
            program,
            args,
            timeout: restart_timeout,
        }
    }

    pub fn describe(&self, container_name: &str) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 2);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(container_name);
        parts.join(" ")
    }

    pub async fn restart(&self, container_name: &str) -> Result<String, ContainerError> {
        let command = self.describe(container_name);
        info!("Restarting container {}: {}", container_name, command);

        let mut child = AsyncCommand::new(&self.program);
        child.args(&self.args).arg(container_name).kill_on_drop(true);

        let output = timeout(self.timeout, child.output())
            .await
            .map_err(|_| ContainerError::Timeout {
                command: command.clone(),
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| ContainerError::SpawnFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(ContainerError::CommandFailed {
                command,
                status: output.status.code(),
                stderr: if stderr.is_empty() { stdout } else { stderr },
            });
        }

        debug!("Restart command output: {}", stdout);
        info!("Container {} restarted successfully", container_name);
        Ok(stdout)
    }
}
