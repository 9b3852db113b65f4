//! Configuration management for the agent and the server
//!
//! Values are layered: built-in defaults, an optional YAML file, then
//! environment variables and command-line flags.

pub mod cli;
pub mod models;
pub mod validation;

pub use cli::{AgentArgs, ServerArgs};
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, TelemetryError};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

/// Load a YAML configuration file
pub async fn from_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TelemetryError::config(format!("Failed to read config file: {}", e)))?;

    let config = serde_yaml::from_str(&content)
        .map_err(|e| TelemetryError::config(format!("Failed to parse config: {}", e)))?;

    debug!("Configuration file parsed");
    Ok(config)
}

impl ServerConfig {
    /// Load and validate a server configuration file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = from_file(path).await?;
        config.check("Server")?;
        Ok(config)
    }
}

impl AgentConfig {
    /// Load and validate an agent configuration file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = from_file(path).await?;
        config.check("Agent")?;
        Ok(config)
    }
}
