//! Test database utilities
//!
//! Each call opens an isolated in-memory SQLite database.

use telemetry_rs::config::{DatabaseConfig, RetrySettings};
use telemetry_rs::storage::SqlBackingStore;

/// Pool and retry settings for an in-memory database
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        // every pooled connection would otherwise get its own database
        max_connections: 1,
        connection_timeout: 5,
        retry: RetrySettings {
            attempts: 2,
            initial_backoff_ms: 10,
            backoff_increment_ms: 10,
            max_backoff_ms: None,
        },
    }
}

/// Migrated SQL backing store over `sqlite::memory:`
pub async fn memory_store() -> SqlBackingStore {
    SqlBackingStore::connect("sqlite::memory:", &test_db_config())
        .await
        .expect("Failed to create in-memory test database")
}
