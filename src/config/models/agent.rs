//! Agent configuration

use super::server::{strip_scheme, validate_address};
use super::*;
use crate::config::Validate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metrics agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Server address, with or without scheme
    #[serde(default = "default_address")]
    pub address: String,
    /// Seconds between deliveries
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
    /// Seconds between runtime samples
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    /// Seconds between host memory/CPU samples
    #[serde(default = "default_host_poll_interval")]
    pub host_poll_interval: u64,
    /// Number of concurrent delivery workers
    #[serde(default = "default_rate_limit")]
    pub rate_limit: usize,
    /// Shared signing key
    #[serde(default)]
    pub key: Option<String>,
    /// Send the whole snapshot to `/updates/` instead of one request per metric
    #[serde(default)]
    pub batch: bool,
    /// Delivery queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
    /// Delivery retry policy
    #[serde(default = "RetrySettings::delivery")]
    pub retry: RetrySettings,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            report_interval: default_report_interval(),
            poll_interval: default_poll_interval(),
            host_poll_interval: default_host_poll_interval(),
            rate_limit: default_rate_limit(),
            key: None,
            batch: false,
            queue_capacity: default_queue_capacity(),
            request_timeout: default_timeout(),
            retry: RetrySettings::delivery(),
        }
    }
}

impl AgentConfig {
    /// Base URL of the server, always with a scheme and no trailing slash
    pub fn endpoint(&self) -> String {
        let address = self.address.trim_end_matches('/');
        if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{}", address)
        }
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn host_poll_interval(&self) -> Duration {
        Duration::from_secs(self.host_poll_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Validate for AgentConfig {
    fn validate(&self) -> Result<(), String> {
        validate_address(strip_scheme(&self.address))?;
        if self.report_interval == 0 || self.poll_interval == 0 || self.host_poll_interval == 0 {
            return Err("poll and report intervals must be positive".to_string());
        }
        if self.rate_limit == 0 {
            return Err("rate_limit must be at least 1".to_string());
        }
        if self.queue_capacity == 0 {
            return Err("queue_capacity must be at least 1".to_string());
        }
        self.retry.validate()
    }
}
