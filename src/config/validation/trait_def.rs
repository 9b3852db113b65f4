//! Validation trait definition

use crate::utils::error::{Result, TelemetryError};

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> std::result::Result<(), String>;

    /// [`Validate::validate`] mapped onto [`TelemetryError::Config`], prefixed with `section`.
    fn check(&self, section: &str) -> Result<()> {
        self.validate()
            .map_err(|e| TelemetryError::config(format!("{} config error: {}", section, e)))
    }
}
