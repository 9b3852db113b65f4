use crate::core::types::{Metric, MetricId, MetricKind, MetricValue};
use crate::storage::BackingStore;
use crate::utils::error::{Result, TelemetryError};
use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, OnConflict};
use sea_orm::{ActiveValue::Set, ConnectionTrait, DbErr, EntityTrait, TransactionTrait};
use tracing::debug;

use super::super::entities::{counter, gauge};
use super::types::{SqlBackingStore, UpsertMode};

impl SqlBackingStore {
    /// Stored value for `id`
    pub async fn get(&self, id: &MetricId) -> Result<Metric> {
        self.retry
            .call_if(|| self.fetch_one(id), TelemetryError::is_transient)
            .await
    }

    /// Upsert one metric: counters add the delta in the database, gauges replace.
    pub async fn update(&self, metric: &Metric) -> Result<()> {
        self.retry
            .call_if(
                || async {
                    upsert(&self.db, metric, UpsertMode::Merge)
                        .await
                        .map_err(TelemetryError::Database)
                },
                TelemetryError::is_transient,
            )
            .await
    }

    /// Upsert a batch with [`SqlBackingStore::update`] semantics in one transaction.
    ///
    /// Any failure rolls the whole batch back.
    pub async fn merge_list(&self, metrics: &[Metric]) -> Result<()> {
        self.retry
            .call_if(
                || self.write_list(metrics, UpsertMode::Merge),
                TelemetryError::is_transient,
            )
            .await
    }

    async fn fetch_one(&self, id: &MetricId) -> Result<Metric> {
        let value = match id.kind {
            MetricKind::Counter => counter::Entity::find_by_id(id.name.clone())
                .one(&self.db)
                .await?
                .map(|row| MetricValue::Counter(row.metric_value)),
            MetricKind::Gauge => gauge::Entity::find_by_id(id.name.clone())
                .one(&self.db)
                .await?
                .map(|row| MetricValue::Gauge(row.metric_value)),
        };

        value
            .map(|value| Metric::new(id.name.clone(), value))
            .ok_or_else(|| TelemetryError::not_found(format!("metric {} is unknown", id)))
    }

    async fn fetch_all(&self) -> Result<Vec<Metric>> {
        let counters = counter::Entity::find().all(&self.db).await?;
        let gauges = gauge::Entity::find().all(&self.db).await?;

        let mut metrics: Vec<Metric> = counters
            .into_iter()
            .map(|row| Metric::counter(row.metric_id, row.metric_value))
            .chain(
                gauges
                    .into_iter()
                    .map(|row| Metric::gauge(row.metric_id, row.metric_value)),
            )
            .collect();
        metrics.sort_by(|a, b| a.name.cmp(&b.name).then(a.kind().cmp(&b.kind())));
        Ok(metrics)
    }

    async fn write_list(&self, metrics: &[Metric], mode: UpsertMode) -> Result<()> {
        let txn = self.db.begin().await?;
        for metric in metrics {
            upsert(&txn, metric, mode).await?;
        }
        txn.commit().await?;

        debug!("Upserted {} metrics ({:?})", metrics.len(), mode);
        Ok(())
    }
}

async fn upsert<C: ConnectionTrait>(
    conn: &C,
    metric: &Metric,
    mode: UpsertMode,
) -> std::result::Result<(), DbErr> {
    match metric.value {
        MetricValue::Counter(delta) => {
            let on_conflict = match mode {
                UpsertMode::Merge => OnConflict::column(counter::Column::MetricId)
                    .value(
                        counter::Column::MetricValue,
                        Expr::col((counter::Entity, counter::Column::MetricValue)).add(
                            Expr::col((Alias::new("excluded"), counter::Column::MetricValue)),
                        ),
                    )
                    .to_owned(),
                UpsertMode::Replace => OnConflict::column(counter::Column::MetricId)
                    .update_column(counter::Column::MetricValue)
                    .to_owned(),
            };

            counter::Entity::insert(counter::ActiveModel {
                metric_id: Set(metric.name.clone()),
                metric_value: Set(delta),
            })
            .on_conflict(on_conflict)
            .exec_without_returning(conn)
            .await?;
        }
        MetricValue::Gauge(value) => {
            gauge::Entity::insert(gauge::ActiveModel {
                metric_id: Set(metric.name.clone()),
                metric_value: Set(value),
            })
            .on_conflict(
                OnConflict::column(gauge::Column::MetricId)
                    .update_column(gauge::Column::MetricValue)
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        }
    }
    Ok(())
}

#[async_trait]
impl BackingStore for SqlBackingStore {
    async fn get_list(&self) -> Result<Vec<Metric>> {
        self.retry
            .call_if(|| self.fetch_all(), TelemetryError::is_transient)
            .await
    }

    /// Checkpoints carry totals, so counters are overwritten here rather than added to.
    async fn update_list(&self, metrics: &[Metric]) -> Result<()> {
        self.retry
            .call_if(
                || self.write_list(metrics, UpsertMode::Replace),
                TelemetryError::is_transient,
            )
            .await
    }

    async fn ping(&self) -> Result<()> {
        self.retry
            .call_if(
                || async { self.db.ping().await.map_err(TelemetryError::Database) },
                TelemetryError::is_transient,
            )
            .await
    }

    fn name(&self) -> &'static str {
        "sql"
    }
}
