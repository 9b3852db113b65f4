//! Integration tests for telemetry-rs
//!
//! These tests drive real backing stores and a real HTTP server.

pub mod agent_tests;
pub mod database_tests;
pub mod durability_tests;
