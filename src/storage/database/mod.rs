//! SQL backing store using SeaORM
//!
//! Counters and gauges live in two tables keyed by metric name. Every
//! operation runs under a retry policy that only retries connection faults.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM backing store implementation module
pub mod seaorm_db;

pub use seaorm_db::{DatabaseBackendType, SqlBackingStore};
