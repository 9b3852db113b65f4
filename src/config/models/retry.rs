//! Retry settings

use crate::config::Validate;
use crate::utils::error::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Linear backoff settings, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts, including the first one
    pub attempts: u32,
    /// Wait before the first retry
    pub initial_backoff_ms: u64,
    /// Added to the wait after each retry
    pub backoff_increment_ms: u64,
    /// Cap on a single wait
    #[serde(default)]
    pub max_backoff_ms: Option<u64>,
}

impl RetrySettings {
    /// Defaults for the SQL backing store
    pub fn database() -> Self {
        Self {
            attempts: 3,
            initial_backoff_ms: 1000,
            backoff_increment_ms: 2000,
            max_backoff_ms: None,
        }
    }

    /// Defaults for agent delivery: three retries waiting 1s, 3s, 5s
    pub fn delivery() -> Self {
        Self {
            attempts: 4,
            initial_backoff_ms: 1000,
            backoff_increment_ms: 2000,
            max_backoff_ms: Some(5000),
        }
    }

    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.attempts,
            initial_delay: Duration::from_millis(self.initial_backoff_ms),
            delay_increment: Duration::from_millis(self.backoff_increment_ms),
            max_delay: self.max_backoff_ms.map(Duration::from_millis),
        }
    }
}

impl Validate for RetrySettings {
    fn validate(&self) -> Result<(), String> {
        if self.attempts == 0 {
            return Err("retry attempts must be at least 1".to_string());
        }
        if let Some(cap) = self.max_backoff_ms {
            if cap < self.initial_backoff_ms {
                return Err("max backoff must not be below the initial backoff".to_string());
            }
        }
        Ok(())
    }
}
