//! Server entry point used by the `metrics-server` binary

use crate::config::ServerArgs;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Resolve the configuration from `args` and run the server until shutdown
pub async fn run_server(args: ServerArgs) -> Result<()> {
    let config = args.into_config().await?;
    info!(
        address = %config.address,
        store_interval = config.store_interval,
        restore = config.restore,
        database = config.database_dsn.is_some(),
        signed = config.key.is_some(),
        "Starting metrics server"
    );

    HttpServer::new(config).await?.start().await
}
