//! HTTP server core implementation

use crate::config::ServerConfig;
use crate::server::middleware::CompressionGate;
use crate::server::routes;
use crate::server::state::AppState;
use crate::services::{Durability, load_into};
use crate::storage::{MetricStore, open_backing_store};
use crate::utils::error::{Result, TelemetryError};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

/// Metrics HTTP server together with its durability machinery
pub struct HttpServer {
    state: AppState,
    durability: Durability,
}

impl HttpServer {
    /// Open the backing store, restore the last checkpoint when configured
    /// to and pick the checkpoint strategy.
    ///
    /// An unreadable checkpoint is fatal: the first write would replace it
    /// with a store missing every restored counter.
    pub async fn new(config: ServerConfig) -> Result<Self> {
        info!("Creating HTTP server");

        let backing = open_backing_store(&config).await?;
        let store = Arc::new(MetricStore::new());

        if config.restore {
            if let Err(e) = load_into(&store, backing.as_ref()).await {
                error!("Could not restore the last checkpoint: {}", e);
                return Err(e);
            }
        }

        let durability = Durability::from_config(&config, store, backing);

        let state = AppState::new(config, durability.controller());
        Ok(Self { state, durability })
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let payload_limit = web::PayloadConfig::new(state.config.max_body_size);

        App::new()
            .app_data(state)
            .app_data(payload_limit)
            .wrap(CompressionGate)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Server", "telemetry-rs")))
            .wrap(TracingLogger::default())
            .configure(routes::configure_routes)
    }

    /// Serve until interrupted, then write a final checkpoint
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.state.config.bind_address().to_string();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| {
                TelemetryError::config(format!("Failed to bind {}: {}", bind_addr, e))
            })?
            .run();

        info!("HTTP server listening on {}", bind_addr);
        server.await?;
        info!("HTTP server stopped");

        self.durability.shutdown().await
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
