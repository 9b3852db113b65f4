//! Metrics server on an ephemeral port

use std::sync::Arc;
use std::time::Duration;
use telemetry_rs::config::ServerConfig;
use telemetry_rs::server::{AppState, HttpServer};
use telemetry_rs::services::{AsyncController, DurabilityController};
use telemetry_rs::storage::{FileBackingStore, MetricStore};
use tempfile::TempDir;

/// Running server plus what it needs to stay alive
pub struct TestServer {
    pub address: String,
    pub storage: Arc<dyn DurabilityController>,
    handle: actix_web::dev::ServerHandle,
    _dir: TempDir,
}

impl TestServer {
    /// Start a server on 127.0.0.1 with an optional signing key
    pub async fn start(key: Option<&str>) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let storage: Arc<dyn DurabilityController> = Arc::new(AsyncController::new(
            Arc::new(MetricStore::new()),
            Arc::new(FileBackingStore::new(dir.path().join("metrics.json"))),
            Duration::from_secs(300),
        ));
        let config = ServerConfig {
            key: key.map(str::to_string),
            ..Default::default()
        };
        let state = actix_web::web::Data::new(AppState::new(config, storage.clone()));

        let server = actix_web::HttpServer::new(move || HttpServer::create_app(state.clone()))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port");
        let address = server.addrs()[0].to_string();
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            address,
            storage,
            handle,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}
