pub mod app_config;
pub mod config;
pub mod feed;

pub use app_config::SyncConfig;
pub use config::{load_sync_config, load_sync_config_from_env};
pub use feed::{parse_stock, FeedRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
