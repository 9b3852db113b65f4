//! Flush-on-write checkpointing

use super::{DurabilityController, load_into};
use crate::core::types::{Metric, MetricId};
use crate::storage::{BackingStore, MetricStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Checkpoints the whole store before acknowledging each write.
///
/// Writers are serialized so a failed checkpoint can be rolled back without
/// clobbering a concurrent write.
pub struct SyncController {
    store: Arc<MetricStore>,
    backing: Arc<dyn BackingStore>,
    write_lock: Mutex<()>,
}

impl SyncController {
    pub fn new(store: Arc<MetricStore>, backing: Arc<dyn BackingStore>) -> Self {
        Self {
            store,
            backing,
            write_lock: Mutex::new(()),
        }
    }

    async fn apply_and_checkpoint(&self, batch: &[Metric]) -> Result<()> {
        let undo = self.store.apply_batch(batch);
        if let Err(e) = self.backing.update_list(&self.store.list()).await {
            warn!("Checkpoint failed, rolling back {} metrics: {}", batch.len(), e);
            self.store.revert(undo);
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl DurabilityController for SyncController {
    async fn get(&self, id: &MetricId) -> Result<Metric> {
        self.store.get(id)
    }

    async fn list(&self) -> Vec<Metric> {
        self.store.list()
    }

    async fn update(&self, metric: &Metric) -> Result<Metric> {
        let _guard = self.write_lock.lock().await;
        self.apply_and_checkpoint(std::slice::from_ref(metric)).await?;
        self.store.get(&metric.id())
    }

    async fn update_batch(&self, batch: &[Metric]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.apply_and_checkpoint(batch).await
    }

    async fn ping(&self) -> Result<()> {
        self.backing.ping().await
    }

    async fn load(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        load_into(&self.store, self.backing.as_ref()).await
    }

    async fn flush(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.backing.update_list(&self.store.list()).await
    }
}
