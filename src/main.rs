//! metrics-server: collects pushed metrics and checkpoints them

#![allow(missing_docs)]

use clap::Parser;
use std::process::ExitCode;
use telemetry_rs::config::ServerArgs;
use telemetry_rs::server;
use telemetry_rs::utils::logging::{LogFormat, init_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();
    init_tracing("info", LogFormat::from_env());

    let args = ServerArgs::parse();
    info!(
        "metrics-server {} ({}, built {})",
        telemetry_rs::VERSION,
        telemetry_rs::GIT_HASH,
        telemetry_rs::BUILD_TIME
    );

    match server::run_server(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
