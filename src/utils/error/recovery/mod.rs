//! Error recovery utilities
//!
//! Linear-backoff retry shared by the SQL backing store and agent delivery.

mod retry;
mod types;

pub use retry::RetryPolicy;
pub use types::RetryConfig;
