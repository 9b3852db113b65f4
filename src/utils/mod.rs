//! Utility modules shared by the agent and the server
//!
//! ## Module Organization
//!
//! - **crypto**: HMAC payload signing
//! - **error**: Error types, HTTP mapping, and retry
//! - **logging**: Tracing subscriber setup
//! - **net**: Body compression

pub mod crypto; // Payload signing
pub mod error; // Error handling
pub mod logging; // Subscriber setup
pub mod net; // Compression helpers

pub use crypto::PayloadSigner;
pub use error::{RetryConfig, RetryPolicy};
