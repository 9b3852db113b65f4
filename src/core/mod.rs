//! Core data structures shared by the agent and the server

pub mod types;

pub use types::{Metric, MetricId, MetricKind, MetricQuery, MetricValue};
