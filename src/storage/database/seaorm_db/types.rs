use crate::utils::error::RetryPolicy;
use sea_orm::DatabaseConnection;

/// SeaORM-based backing store
#[derive(Debug)]
pub struct SqlBackingStore {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
    /// Applied around every database round trip
    pub(super) retry: RetryPolicy,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

impl DatabaseBackendType {
    pub fn from_dsn(dsn: &str) -> Self {
        if dsn.starts_with("sqlite") {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        }
    }
}

/// How a stored row combines with an incoming one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UpsertMode {
    /// Counters add the incoming delta, gauges replace
    Merge,
    /// Both kinds take the incoming value
    Replace,
}
