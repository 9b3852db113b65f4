//! Configuration data models
//!
//! This module defines the configuration structures of the agent and the server.

#![allow(missing_docs)]

pub mod agent;
pub mod retry;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use agent::*;
pub use retry::*;
pub use server::*;
pub use storage::*;

/// Default listen / target address
pub fn default_address() -> String {
    "localhost:8080".to_string()
}

/// Default checkpoint interval in seconds
pub fn default_store_interval() -> u64 {
    300
}

/// Default checkpoint file
pub fn default_file_storage_path() -> std::path::PathBuf {
    std::path::PathBuf::from("/tmp/metrics-db.json")
}

/// Default report interval in seconds
pub fn default_report_interval() -> u64 {
    10
}

/// Default sampling interval in seconds
pub fn default_poll_interval() -> u64 {
    2
}

/// Default host sampling interval in seconds
pub fn default_host_poll_interval() -> u64 {
    10
}

/// Default number of delivery workers
pub fn default_rate_limit() -> usize {
    2
}

/// Default delivery queue capacity
pub fn default_queue_capacity() -> usize {
    256
}

/// Default request / connect timeout in seconds
pub fn default_timeout() -> u64 {
    10
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    4 * 1024 * 1024 // 4MB
}

pub(crate) fn default_true() -> bool {
    true
}
