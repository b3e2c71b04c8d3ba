//! Restart command double
//!
//! Builds a `restart_command` that appends the container name to a file
//! instead of restarting anything, so tests can count restarts.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct RestartRecorder {
    _dir: TempDir,
    log_path: PathBuf,
}

impl RestartRecorder {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let log_path = dir.path().join("restarts.log");
        Self {
            _dir: dir,
            log_path,
        }
    }

    /// `sh -c` script; the appended container name arrives as `$0`
    pub fn command(&self) -> Vec<String> {
        vec![
            "sh".to_string(),
            "-c".to_string(),
            format!("echo \"$0\" >> '{}'", self.log_path.display()),
        ]
    }

    /// Container names restarted so far, in order
    pub fn restarts(&self) -> Vec<String> {
        fs::read_to_string(&self.log_path)
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.restarts().len()
    }
}
