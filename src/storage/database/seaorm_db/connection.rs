use crate::config::DatabaseConfig;
use crate::utils::error::{Result, RetryPolicy, TelemetryError};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info};

use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, SqlBackingStore};

impl SqlBackingStore {
    /// Connect to `dsn` and create the metric tables if needed.
    pub async fn connect(dsn: &str, config: &DatabaseConfig) -> Result<Self> {
        let retry = RetryPolicy::new(config.retry.to_retry_config());
        let db = retry
            .call_if(|| Self::try_connect(dsn, config), TelemetryError::is_transient)
            .await?;

        let backend_type = DatabaseBackendType::from_dsn(dsn);
        info!("Database connection established ({:?})", backend_type);

        Self::with_connection(db, backend_type, retry).await
    }

    /// Wrap an open connection and run migrations on it.
    pub async fn with_connection(
        db: DatabaseConnection,
        backend_type: DatabaseBackendType,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let store = Self {
            db,
            backend_type,
            retry,
        };
        store.migrate().await?;
        Ok(store)
    }

    /// Try to connect to a database
    async fn try_connect(dsn: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(dsn.to_string());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(TelemetryError::Database)
    }

    /// Create the counter and gauge tables
    pub async fn migrate(&self) -> Result<()> {
        debug!("Running database migrations");
        self.retry
            .call_if(
                || async { Migrator::up(&self.db, None).await.map_err(TelemetryError::Database) },
                TelemetryError::is_transient,
            )
            .await
    }

    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Close the connection pool
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(TelemetryError::Database)
    }
}
