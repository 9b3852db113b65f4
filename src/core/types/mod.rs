//! Metric model and its JSON wire form

mod metric;

pub use metric::{Metric, MetricId, MetricKind, MetricQuery, MetricValue};
