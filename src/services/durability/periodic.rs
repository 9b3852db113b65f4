//! Timer-driven checkpointing

use super::{DurabilityController, load_into};
use crate::core::types::{Metric, MetricId};
use crate::storage::{BackingStore, MetricStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Acknowledges writes once the store has them; a background task
/// checkpoints every `interval`.
pub struct AsyncController {
    store: Arc<MetricStore>,
    backing: Arc<dyn BackingStore>,
    interval: Duration,
    flush_lock: Mutex<()>,
}

impl AsyncController {
    pub fn new(store: Arc<MetricStore>, backing: Arc<dyn BackingStore>, interval: Duration) -> Self {
        Self {
            store,
            backing,
            interval,
            flush_lock: Mutex::new(()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Checkpoint every `interval`, starting one interval from now.
    ///
    /// Failed checkpoints are logged and retried on the next tick.
    pub fn spawn_flush_task(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match self.flush().await {
                    Ok(()) => debug!("Periodic checkpoint written"),
                    Err(e) => warn!("Periodic checkpoint failed: {}", e),
                }
            }
        })
    }
}

#[async_trait]
impl DurabilityController for AsyncController {
    async fn get(&self, id: &MetricId) -> Result<Metric> {
        self.store.get(id)
    }

    async fn list(&self) -> Vec<Metric> {
        self.store.list()
    }

    async fn update(&self, metric: &Metric) -> Result<Metric> {
        Ok(self.store.update(metric))
    }

    async fn update_batch(&self, batch: &[Metric]) -> Result<()> {
        self.store.update_batch(batch);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.backing.ping().await
    }

    async fn load(&self) -> Result<usize> {
        load_into(&self.store, self.backing.as_ref()).await
    }

    async fn flush(&self) -> Result<()> {
        let _guard = self.flush_lock.lock().await;
        let snapshot = self.store.list();
        self.backing.update_list(&snapshot).await
    }
}
