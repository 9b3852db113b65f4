//! Helper functions for creating specific error types

use super::classify::is_transient_db_error;
use super::types::TelemetryError;

impl TelemetryError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn signature<S: Into<String>>(message: S) -> Self {
        Self::Signature(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn retry_exhausted(attempts: u32, last: TelemetryError) -> Self {
        Self::RetryExhausted {
            attempts,
            source: Box::new(last),
        }
    }

    /// Whether a storage operation failing with this error is worth retrying.
    ///
    /// Only connection-level database faults qualify. Constraint violations,
    /// malformed statements and everything outside the database are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Database(err) => is_transient_db_error(err),
            _ => false,
        }
    }

    /// Client-side faults (4xx), never retried by callers.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::Signature(_)
        )
    }
}
