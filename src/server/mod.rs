//! HTTP server for the metrics service
//!
//! This module hosts the actix-web application: request extraction with
//! signature checks, metric routes, response compression and the
//! checkpoint-aware startup and shutdown sequence.

pub mod builder;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;


pub use builder::run_server;
pub use server::HttpServer;
pub use state::AppState;
