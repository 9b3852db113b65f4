//! File backing store
//!
//! Checkpoints are stored as a stream of JSON records, one metric per line.

mod local;

// Re-export public types
pub use local::FileBackingStore;
