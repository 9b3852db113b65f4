//! Error handling for the telemetry pipeline
//!
//! This module defines all error types used by the agent and the server.

#![allow(missing_docs)]

mod classify;
mod helpers;
mod response;
mod types;

pub use classify::{is_transient_db_error, is_transient_sqlstate};
pub use response::{ErrorDetail, ErrorResponse};
pub use types::{Result, TelemetryError};
