//! # telemetry-rs
//!
//! A push-based metrics pipeline.
//!
//! - The **agent** samples allocator, synthetic and host metrics on its own
//!   timers and pushes them, signed and gzipped, through a bounded pool of
//!   delivery workers with retry.
//! - The **server** merges incoming samples into an in-memory store and
//!   checkpoints it to a file or a SQL database, either on every write or on
//!   a fixed interval.
//!
//! ## Running
//!
//! ```bash
//! metrics-server -a localhost:8080 -i 0 -f /tmp/metrics-db.json
//! metrics-agent -a localhost:8080 -p 2 -r 10 -l 4
//! ```
//!
//! ## Library use
//!
//! ```rust,no_run
//! use telemetry_rs::config::ServerConfig;
//! use telemetry_rs::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> telemetry_rs::Result<()> {
//!     let config = ServerConfig {
//!         store_interval: 0,
//!         ..Default::default()
//!     };
//!     HttpServer::new(config).await?.start().await
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod agent;
pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

pub use crate::core::types::{Metric, MetricId, MetricKind, MetricValue};
pub use utils::error::{Result, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash recorded at build time
pub const GIT_HASH: &str = env!("GIT_HASH");

/// Build timestamp, seconds since the Unix epoch
pub const BUILD_TIME: &str = env!("BUILD_TIME");
