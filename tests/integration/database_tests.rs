//! SQL backing store tests against in-memory SQLite

#[cfg(test)]
mod tests {
    use crate::common::memory_store;
    use crate::{assert_err, assert_ok};
    use telemetry_rs::core::types::{Metric, MetricId};
    use telemetry_rs::storage::BackingStore;
    use telemetry_rs::storage::database::DatabaseBackendType;
    use telemetry_rs::TelemetryError;

    #[tokio::test]
    async fn test_fresh_store_is_empty_and_reachable() {
        let store = memory_store().await;

        assert_eq!(store.backend_type(), DatabaseBackendType::SQLite);
        assert_ok!(store.ping().await);
        assert!(assert_ok!(store.get_list().await).is_empty());
        assert_eq!(store.name(), "sql");
    }

    #[tokio::test]
    async fn test_checkpoint_round_trip() {
        let store = memory_store().await;
        let checkpoint = vec![
            Metric::gauge("Alloc", 2048.5),
            Metric::counter("PollCount", 42),
            Metric::gauge("RandomValue", 17.25),
        ];

        assert_ok!(store.update_list(&checkpoint).await);
        assert_eq!(assert_ok!(store.get_list().await), checkpoint);
    }

    #[tokio::test]
    async fn test_checkpoint_replaces_counter_totals() {
        let store = memory_store().await;

        assert_ok!(store.update_list(&[Metric::counter("hits", 5)]).await);
        assert_ok!(store.update_list(&[Metric::counter("hits", 12)]).await);

        assert_eq!(
            assert_ok!(store.get(&MetricId::counter("hits")).await),
            Metric::counter("hits", 12)
        );
    }

    #[tokio::test]
    async fn test_update_accumulates_counters_in_database() {
        let store = memory_store().await;

        assert_ok!(store.update(&Metric::counter("hits", 5)).await);
        assert_ok!(store.update(&Metric::counter("hits", 7)).await);
        assert_ok!(store.update(&Metric::gauge("temp", 5.5)).await);
        assert_ok!(store.update(&Metric::gauge("temp", 6.1)).await);

        assert_eq!(
            assert_ok!(store.get(&MetricId::counter("hits")).await),
            Metric::counter("hits", 12)
        );
        assert_eq!(
            assert_ok!(store.get(&MetricId::gauge("temp")).await),
            Metric::gauge("temp", 6.1)
        );
    }

    #[tokio::test]
    async fn test_merge_list_sums_within_one_batch() {
        let store = memory_store().await;

        assert_ok!(
            store
                .merge_list(&[
                    Metric::counter("PollCount", 1),
                    Metric::counter("PollCount", 2),
                    Metric::gauge("Alloc", 1.0),
                ])
                .await
        );

        assert_eq!(
            assert_ok!(store.get_list().await),
            vec![Metric::gauge("Alloc", 1.0), Metric::counter("PollCount", 3)]
        );
    }

    #[tokio::test]
    async fn test_failed_batch_rolls_back() {
        let store = memory_store().await;

        // SQLite stores NaN as NULL, which the NOT NULL column rejects
        let err = assert_err!(
            store
                .merge_list(&[Metric::counter("hits", 1), Metric::gauge("broken", f64::NAN)])
                .await
        );

        assert!(matches!(err, TelemetryError::Database(_)), "{:?}", err);
        assert!(assert_ok!(store.get_list().await).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_metric_is_not_found() {
        let store = memory_store().await;
        assert_ok!(store.update(&Metric::gauge("hits", 1.0)).await);

        let err = assert_err!(store.get(&MetricId::counter("hits")).await);
        assert!(matches!(err, TelemetryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_same_name_different_kinds_coexist() {
        let store = memory_store().await;
        assert_ok!(
            store
                .update_list(&[Metric::counter("x", 1), Metric::gauge("x", 2.0)])
                .await
        );

        assert_eq!(
            assert_ok!(store.get_list().await),
            vec![Metric::counter("x", 1), Metric::gauge("x", 2.0)]
        );
    }
}
