//! Application state shared across HTTP handlers

use crate::config::ServerConfig;
use crate::services::DurabilityController;
use crate::utils::crypto::PayloadSigner;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so cloning per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (shared read-only)
    pub config: Arc<ServerConfig>,
    /// Store front with the configured durability strategy
    pub storage: Arc<dyn DurabilityController>,
    /// Request signature verifier
    pub signer: Arc<PayloadSigner>,
}

impl AppState {
    pub fn new(config: ServerConfig, storage: Arc<dyn DurabilityController>) -> Self {
        let signer = PayloadSigner::new(config.key.as_deref());
        Self {
            config: Arc::new(config),
            storage,
            signer: Arc::new(signer),
        }
    }
}
