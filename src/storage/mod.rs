//! Storage layer for the metrics server
//!
//! The in-memory [`MetricStore`] is the primary copy; a [`BackingStore`]
//! holds checkpoints of it on disk or in a database.

/// Database backing store module
pub mod database;
/// File backing store module
pub mod files;
/// In-memory metric store
pub mod memory;

pub use database::SqlBackingStore;
pub use files::FileBackingStore;
pub use memory::MetricStore;

use crate::config::ServerConfig;
use crate::core::types::Metric;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Durable home for full-store checkpoints
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Every persisted metric.
    async fn get_list(&self) -> Result<Vec<Metric>>;

    /// Persist a full checkpoint. The list carries absolute values.
    async fn update_list(&self, metrics: &[Metric]) -> Result<()>;

    /// Succeeds iff the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Short label for logs
    fn name(&self) -> &'static str;
}

/// Open the backing store selected by the configuration.
///
/// A database DSN selects the SQL store; otherwise the file at
/// `file_storage_path` is used.
pub async fn open_backing_store(config: &ServerConfig) -> Result<Arc<dyn BackingStore>> {
    match config.database_dsn.as_deref().filter(|dsn| !dsn.is_empty()) {
        Some(dsn) => {
            info!("Using SQL backing store");
            let store = SqlBackingStore::connect(dsn, &config.database).await?;
            Ok(Arc::new(store))
        }
        None => {
            info!(
                "Using file backing store at {}",
                config.file_storage_path.display()
            );
            Ok(Arc::new(FileBackingStore::new(&config.file_storage_path)))
        }
    }
}
