//! Error types for the telemetry pipeline

use thiserror::Error;

/// Result type alias for the telemetry pipeline
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Main error type for the telemetry pipeline
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed metric payloads or path parameters
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown metric identity on read
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload signature missing or mismatched
    #[error("Signature mismatch: {0}")]
    Signature(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Backing store errors outside the database driver
    #[error("Storage error: {0}")]
    Storage(String),

    /// A retried operation gave up
    #[error("after {attempts} attempts, last error: {source}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: Box<TelemetryError>,
    },

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Delivery rejected by the server
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cryptographic errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
