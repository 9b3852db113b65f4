//! Storage configuration

use super::*;
use crate::config::Validate;
use serde::{Deserialize, Serialize};

/// SQL backing store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connect / acquire timeout in seconds
    #[serde(default = "default_db_timeout")]
    pub connection_timeout: u64,
    /// Retry policy for connection faults
    #[serde(default = "RetrySettings::database")]
    pub retry: RetrySettings,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            connection_timeout: default_db_timeout(),
            retry: RetrySettings::database(),
        }
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("database max_connections must be at least 1".to_string());
        }
        self.retry.validate()
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_db_timeout() -> u64 {
    5
}
