//! Command-line and environment overrides

use super::{AgentConfig, ServerConfig, Validate};
use crate::utils::error::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Metrics server
#[derive(Debug, Default, Parser)]
#[command(name = "metrics-server", version, about = "Collects and stores pushed metrics")]
pub struct ServerArgs {
    /// YAML configuration file
    #[arg(short = 'c', long = "config", env = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address, host:port
    #[arg(short = 'a', long, env = "ADDRESS")]
    pub address: Option<String>,

    /// Checkpoint interval in seconds, 0 for every write
    #[arg(short = 'i', long = "store-interval", env = "STORE_INTERVAL")]
    pub store_interval: Option<u64>,

    /// Checkpoint file path
    #[arg(short = 'f', long = "file-storage-path", env = "FILE_STORAGE_PATH")]
    pub file_storage_path: Option<PathBuf>,

    /// Load the last checkpoint at startup
    #[arg(short = 'r', long, env = "RESTORE", action = ArgAction::Set)]
    pub restore: Option<bool>,

    /// Database DSN; selects the SQL backing store
    #[arg(short = 'd', long = "database-dsn", env = "DATABASE_DSN")]
    pub database_dsn: Option<String>,

    /// Signing key
    #[arg(short = 'k', long, env = "KEY", hide_env_values = true)]
    pub key: Option<String>,
}

impl ServerArgs {
    /// Resolve the final configuration: file (or defaults), then overrides.
    pub async fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path).await?,
            None => ServerConfig::default(),
        };

        if let Some(address) = self.address {
            config.address = address;
        }
        if let Some(interval) = self.store_interval {
            config.store_interval = interval;
        }
        if let Some(path) = self.file_storage_path {
            config.file_storage_path = path;
        }
        if let Some(restore) = self.restore {
            config.restore = restore;
        }
        if let Some(dsn) = self.database_dsn {
            config.database_dsn = Some(dsn);
        }
        if let Some(key) = self.key {
            config.key = Some(key);
        }

        config.check("Server")?;
        Ok(config)
    }
}

/// Metrics agent
#[derive(Debug, Default, Parser)]
#[command(name = "metrics-agent", version, about = "Samples runtime metrics and pushes them to a metrics server")]
pub struct AgentArgs {
    /// YAML configuration file
    #[arg(short = 'c', long = "config", env = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Server address
    #[arg(short = 'a', long, env = "ADDRESS")]
    pub address: Option<String>,

    /// Report interval in seconds
    #[arg(short = 'r', long = "report-interval", env = "REPORT_INTERVAL")]
    pub report_interval: Option<u64>,

    /// Poll interval in seconds
    #[arg(short = 'p', long = "poll-interval", env = "POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Host memory/CPU poll interval in seconds
    #[arg(long = "host-poll-interval", env = "HOST_POLL_INTERVAL")]
    pub host_poll_interval: Option<u64>,

    /// Number of concurrent delivery workers
    #[arg(short = 'l', long = "rate-limit", env = "RATE_LIMIT")]
    pub rate_limit: Option<usize>,

    /// Signing key
    #[arg(short = 'k', long, env = "KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Deliver the snapshot as one batch request
    #[arg(short = 'b', long, env = "BATCH", action = ArgAction::Set)]
    pub batch: Option<bool>,
}

impl AgentArgs {
    /// Resolve the final configuration: file (or defaults), then overrides.
    pub async fn into_config(self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::from_file(path).await?,
            None => AgentConfig::default(),
        };

        if let Some(address) = self.address {
            config.address = address;
        }
        if let Some(interval) = self.report_interval {
            config.report_interval = interval;
        }
        if let Some(interval) = self.poll_interval {
            config.poll_interval = interval;
        }
        if let Some(interval) = self.host_poll_interval {
            config.host_poll_interval = interval;
        }
        if let Some(limit) = self.rate_limit {
            config.rate_limit = limit;
        }
        if let Some(key) = self.key {
            config.key = Some(key);
        }
        if let Some(batch) = self.batch {
            config.batch = batch;
        }

        config.check("Agent")?;
        Ok(config)
    }
}
