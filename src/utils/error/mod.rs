//! Error handling utilities
//!
//! This module provides the crate error type, its HTTP mapping, and the retry policy
//! used around storage and delivery operations.

pub mod error;
pub mod recovery;

// Re-export commonly used types and functions
pub use error::*;
pub use recovery::*;
