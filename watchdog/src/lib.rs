pub mod alerts;
pub mod config;
pub mod constants;
pub mod container;
pub mod errors;
pub mod health;
pub mod rpc;

// Re-export commonly used types
pub use alerts::AlertService;
pub use config::{Config, ConfigManager};
pub use health::{CheckOutcome, HealthMonitor};
pub use rpc::JsonRpcClient;
