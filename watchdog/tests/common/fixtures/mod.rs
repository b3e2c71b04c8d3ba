//! This module provides reusable test utilities:
//! - Mock JSON-RPC servers for the reference and local endpoints
//! - A restart command that records invocations instead of touching containers
//! - Test configuration builders

// Allow unused code in test fixtures - not every test binary uses all of them
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_rpc;
pub mod restart_recorder;
pub mod test_config;

// Re-export commonly used items
pub use mock_rpc::MockRpcServer;
pub use restart_recorder::RestartRecorder;
pub use test_config::TestConfigBuilder;
