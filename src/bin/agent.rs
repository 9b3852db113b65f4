//! metrics-agent: samples runtime and host metrics and pushes them

#![allow(missing_docs)]

use clap::Parser;
use std::process::ExitCode;
use telemetry_rs::agent::{Agent, CountingAllocator};
use telemetry_rs::config::AgentArgs;
use telemetry_rs::utils::logging::{LogFormat, init_tracing};
use tracing::error;

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

async fn run(args: AgentArgs) -> telemetry_rs::Result<()> {
    let config = args.into_config().await?;
    Agent::new(config)?.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();
    init_tracing("info", LogFormat::from_env());

    match run(AgentArgs::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Agent failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
