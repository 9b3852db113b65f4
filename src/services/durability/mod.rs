//! Checkpointing of the in-memory metric store
//!
//! A [`DurabilityController`] fronts the [`MetricStore`] and decides when its
//! contents reach the [`BackingStore`]:
//!
//! - [`SyncController`] checkpoints before acknowledging every write.
//! - [`AsyncController`] acknowledges immediately and checkpoints on a timer.
//!
//! A checkpoint interval of zero selects the synchronous strategy.

mod periodic;
mod sync;

pub use periodic::AsyncController;
pub use sync::SyncController;

use crate::config::ServerConfig;
use crate::core::types::{Metric, MetricId};
use crate::storage::{BackingStore, MetricStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Store operations with a durability guarantee
#[async_trait]
pub trait DurabilityController: Send + Sync {
    /// Current value for `id`
    async fn get(&self, id: &MetricId) -> Result<Metric>;

    /// Every stored metric
    async fn list(&self) -> Vec<Metric>;

    /// Merge one sample and return the stored result
    async fn update(&self, metric: &Metric) -> Result<Metric>;

    /// Merge a batch; on error the store is left as it was
    async fn update_batch(&self, batch: &[Metric]) -> Result<()>;

    /// Reachability of the backing store
    async fn ping(&self) -> Result<()>;

    /// Replay the last checkpoint into the store; returns the number of metrics read
    async fn load(&self) -> Result<usize>;

    /// Write a full checkpoint now
    async fn flush(&self) -> Result<()>;
}

/// Replay everything in `backing` into `store`
pub async fn load_into(store: &MetricStore, backing: &dyn BackingStore) -> Result<usize> {
    let metrics = backing.get_list().await?;
    store.update_batch(&metrics);
    info!(
        "Restored {} metrics from the {} backing store",
        metrics.len(),
        backing.name()
    );
    Ok(metrics.len())
}

/// The controller chosen for a server plus its background flusher, if any
pub struct Durability {
    controller: Arc<dyn DurabilityController>,
    flusher: Option<JoinHandle<()>>,
}

impl Durability {
    /// Pick the strategy from `store_interval` and start it.
    ///
    /// Must be called inside a Tokio runtime when the interval is nonzero.
    pub fn from_config(
        config: &ServerConfig,
        store: Arc<MetricStore>,
        backing: Arc<dyn BackingStore>,
    ) -> Self {
        if config.is_sync_checkpoint() {
            info!("Checkpointing on every write");
            Self {
                controller: Arc::new(SyncController::new(store, backing)),
                flusher: None,
            }
        } else {
            let interval = config.store_interval();
            info!("Checkpointing every {:?}", interval);
            let controller = Arc::new(AsyncController::new(store, backing, interval));
            let flusher = controller.clone().spawn_flush_task();
            Self {
                controller,
                flusher: Some(flusher),
            }
        }
    }

    pub fn controller(&self) -> Arc<dyn DurabilityController> {
        self.controller.clone()
    }

    /// Stop the flusher and write a last checkpoint
    pub async fn shutdown(self) -> Result<()> {
        if let Some(flusher) = self.flusher {
            flusher.abort();
            if let Err(e) = self.controller.flush().await {
                warn!("Final checkpoint failed: {}", e);
                return Err(e);
            }
            info!("Final checkpoint written");
        }
        Ok(())
    }
}
