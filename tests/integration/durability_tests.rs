//! Durability strategies over real backing stores

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::memory_store;
    use std::sync::Arc;
    use std::time::Duration;
    use telemetry_rs::core::types::{Metric, MetricId};
    use telemetry_rs::services::{AsyncController, DurabilityController, SyncController};
    use telemetry_rs::storage::{BackingStore, FileBackingStore, MetricStore};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_async_update_visible_after_one_interval() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metrics.json");
        let interval = Duration::from_millis(300);

        let controller = Arc::new(AsyncController::new(
            Arc::new(MetricStore::new()),
            Arc::new(FileBackingStore::new(&path)),
            interval,
        ));
        let flusher = controller.clone().spawn_flush_task();

        assert_ok!(controller.update(&Metric::gauge("temp", 5.5)).await);
        let early = assert_ok!(FileBackingStore::new(&path).get_list().await);
        assert!(early.is_empty());

        tokio::time::sleep(interval * 2).await;
        let late = assert_ok!(FileBackingStore::new(&path).get_list().await);
        assert_eq!(late, vec![Metric::gauge("temp", 5.5)]);

        flusher.abort();
    }

    #[tokio::test]
    async fn test_sync_over_sql_reloads_totals() {
        let backing: Arc<dyn BackingStore> = Arc::new(memory_store().await);
        let controller = SyncController::new(Arc::new(MetricStore::new()), backing.clone());

        assert_ok!(controller.update(&Metric::counter("hits", 5)).await);
        assert_ok!(controller.update(&Metric::counter("hits", 7)).await);
        assert_ok!(
            controller
                .update_batch(&[Metric::counter("hits", 1), Metric::gauge("temp", 6.1)])
                .await
        );

        let restored = Arc::new(MetricStore::new());
        let reloaded = SyncController::new(restored.clone(), backing);
        assert_eq!(assert_ok!(reloaded.load().await), 2);
        assert_eq!(
            assert_ok!(restored.get(&MetricId::counter("hits"))),
            Metric::counter("hits", 13)
        );
        assert_eq!(
            assert_ok!(restored.get(&MetricId::gauge("temp"))),
            Metric::gauge("temp", 6.1)
        );
    }
}
