//! Server configuration

use super::*;
use crate::config::Validate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Metrics server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address, `host:port`
    #[serde(default = "default_address")]
    pub address: String,
    /// Checkpoint interval in seconds; 0 checkpoints on every write
    #[serde(default = "default_store_interval")]
    pub store_interval: u64,
    /// Checkpoint file used when no database is configured
    #[serde(default = "default_file_storage_path")]
    pub file_storage_path: PathBuf,
    /// Load the last checkpoint at startup
    #[serde(default = "default_true")]
    pub restore: bool,
    /// SQL backing store DSN
    #[serde(default)]
    pub database_dsn: Option<String>,
    /// Shared signing key
    #[serde(default)]
    pub key: Option<String>,
    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// SQL pool and retry settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            store_interval: default_store_interval(),
            file_storage_path: default_file_storage_path(),
            restore: true,
            database_dsn: None,
            key: None,
            max_body_size: default_max_body_size(),
            database: DatabaseConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn store_interval(&self) -> Duration {
        Duration::from_secs(self.store_interval)
    }

    /// Whether every write is checkpointed before it is acknowledged
    pub fn is_sync_checkpoint(&self) -> bool {
        self.store_interval == 0
    }

    /// Address to bind, without any URL scheme
    pub fn bind_address(&self) -> &str {
        strip_scheme(&self.address)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        validate_address(self.bind_address())?;
        if self.file_storage_path.as_os_str().is_empty() && self.database_dsn.is_none() {
            return Err("either a checkpoint file or a database DSN is required".to_string());
        }
        if self.max_body_size == 0 {
            return Err("max_body_size must be positive".to_string());
        }
        self.database.validate()
    }
}

pub(crate) fn strip_scheme(address: &str) -> &str {
    address
        .strip_prefix("http://")
        .or_else(|| address.strip_prefix("https://"))
        .unwrap_or(address)
        .trim_end_matches('/')
}

pub(crate) fn validate_address(address: &str) -> Result<(), String> {
    let Some((host, port)) = address.rsplit_once(':') else {
        return Err(format!("address '{}' must be host:port", address));
    };
    if host.is_empty() {
        return Err(format!("address '{}' has no host", address));
    }
    port.parse::<u16>()
        .map(|_| ())
        .map_err(|_| format!("address '{}' has an invalid port", address))
}
