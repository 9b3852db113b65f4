//! Typed metric samples
//!
//! A metric is identified by `(kind, name)` and carries a value tagged with
//! its kind: counters carry an additive delta, gauges an absolute reading.
//!
//! On the wire a metric is `{"id", "type", "delta"?, "value"?}` with the field
//! that does not apply to the kind omitted.

use crate::utils::error::{Result, TelemetryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metric kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "counter" => Ok(MetricKind::Counter),
            "gauge" => Ok(MetricKind::Gauge),
            other => Err(TelemetryError::validation(format!(
                "unknown metric type '{}'",
                other
            ))),
        }
    }
}

/// Unique metric key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricId {
    pub name: String,
    pub kind: MetricKind,
}

impl MetricId {
    pub fn new(name: impl Into<String>, kind: MetricKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn counter(name: impl Into<String>) -> Self {
        Self::new(name, MetricKind::Counter)
    }

    pub fn gauge(name: impl Into<String>) -> Self {
        Self::new(name, MetricKind::Gauge)
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Value tagged with its kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Counter(i64),
    Gauge(f64),
}

impl MetricValue {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Counter(_) => MetricKind::Counter,
            MetricValue::Gauge(_) => MetricKind::Gauge,
        }
    }

    /// Parse a textual value for the given kind.
    ///
    /// Counters take a signed 64-bit integer, gauges a finite float.
    pub fn parse(kind: MetricKind, raw: &str) -> Result<Self> {
        match kind {
            MetricKind::Counter => raw.parse::<i64>().map(MetricValue::Counter).map_err(|e| {
                TelemetryError::validation(format!("invalid counter value '{}': {}", raw, e))
            }),
            MetricKind::Gauge => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(MetricValue::Gauge(v)),
                Ok(_) => Err(TelemetryError::validation(format!(
                    "gauge value '{}' is not finite",
                    raw
                ))),
                Err(e) => Err(TelemetryError::validation(format!(
                    "invalid gauge value '{}': {}",
                    raw, e
                ))),
            },
        }
    }

    /// Apply `incoming` on top of `self`: counters add, gauges replace.
    ///
    /// Kinds are expected to match; a mismatched `incoming` wins outright.
    pub fn merge(self, incoming: MetricValue) -> MetricValue {
        match (self, incoming) {
            (MetricValue::Counter(stored), MetricValue::Counter(delta)) => {
                MetricValue::Counter(stored.wrapping_add(delta))
            }
            (_, incoming) => incoming,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Counter(v) => write!(f, "{}", v),
            // shortest representation that round-trips, never exponent form
            MetricValue::Gauge(v) => write!(f, "{}", v),
        }
    }
}

/// A named, typed metric sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetricPayload", into = "MetricPayload")]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: MetricValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn counter(name: impl Into<String>, delta: i64) -> Self {
        Self::new(name, MetricValue::Counter(delta))
    }

    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, MetricValue::Gauge(value))
    }

    pub fn kind(&self) -> MetricKind {
        self.value.kind()
    }

    pub fn id(&self) -> MetricId {
        MetricId::new(self.name.clone(), self.kind())
    }
}

/// Read request body: `{"id", "type"}`
#[derive(Debug, Clone, Deserialize)]
pub struct MetricQuery {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MetricKind,
}

impl From<MetricQuery> for MetricId {
    fn from(query: MetricQuery) -> Self {
        MetricId::new(query.id, query.kind)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MetricPayload {
    id: String,
    #[serde(rename = "type")]
    kind: MetricKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delta: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

impl TryFrom<MetricPayload> for Metric {
    type Error = TelemetryError;

    fn try_from(payload: MetricPayload) -> Result<Self> {
        if payload.id.is_empty() {
            return Err(TelemetryError::validation("metric id is empty"));
        }

        let value = match (payload.kind, payload.delta, payload.value) {
            (MetricKind::Counter, Some(delta), _) => MetricValue::Counter(delta),
            (MetricKind::Gauge, _, Some(value)) => MetricValue::Gauge(value),
            (MetricKind::Counter, None, _) => {
                return Err(TelemetryError::validation(format!(
                    "counter '{}' has no delta",
                    payload.id
                )));
            }
            (MetricKind::Gauge, _, None) => {
                return Err(TelemetryError::validation(format!(
                    "gauge '{}' has no value",
                    payload.id
                )));
            }
        };

        Ok(Metric {
            name: payload.id,
            value,
        })
    }
}

impl From<Metric> for MetricPayload {
    fn from(metric: Metric) -> Self {
        let (delta, value) = match metric.value {
            MetricValue::Counter(delta) => (Some(delta), None),
            MetricValue::Gauge(value) => (None, Some(value)),
        };
        MetricPayload {
            id: metric.name,
            kind: metric.value.kind(),
            delta,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_wire_form_omits_value() {
        let json = serde_json::to_string(&Metric::counter("PollCount", 3)).unwrap();
        assert_eq!(json, r#"{"id":"PollCount","type":"counter","delta":3}"#);
    }

    #[test]
    fn test_gauge_wire_form_omits_delta() {
        let json = serde_json::to_string(&Metric::gauge("Alloc", 1.5)).unwrap();
        assert_eq!(json, r#"{"id":"Alloc","type":"gauge","value":1.5}"#);
    }

    #[test]
    fn test_decode_gauge_from_integer_literal() {
        let metric: Metric = serde_json::from_str(r#"{"id":"temp","type":"gauge","value":6}"#).unwrap();
        assert_eq!(metric, Metric::gauge("temp", 6.0));
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let err = serde_json::from_str::<Metric>(r#"{"id":"hits","type":"counter","value":1.0}"#);
        assert!(err.is_err());

        let err = serde_json::from_str::<Metric>(r#"{"id":"hits","type":"histogram","delta":1}"#);
        assert!(err.is_err());

        let err = serde_json::from_str::<Metric>(r#"{"id":"","type":"counter","delta":1}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(
            MetricValue::parse(MetricKind::Counter, "-7").unwrap(),
            MetricValue::Counter(-7)
        );
        assert_eq!(
            MetricValue::parse(MetricKind::Gauge, "6.1").unwrap(),
            MetricValue::Gauge(6.1)
        );
        assert!(MetricValue::parse(MetricKind::Counter, "1.5").is_err());
        assert!(MetricValue::parse(MetricKind::Gauge, "abc").is_err());
        assert!(MetricValue::parse(MetricKind::Gauge, "NaN").is_err());
    }

    #[test]
    fn test_merge_rules() {
        let counter = MetricValue::Counter(5).merge(MetricValue::Counter(7));
        assert_eq!(counter, MetricValue::Counter(12));

        let gauge = MetricValue::Gauge(5.5).merge(MetricValue::Gauge(6.1));
        assert_eq!(gauge, MetricValue::Gauge(6.1));
    }

    #[test]
    fn test_display_is_plain_decimal() {
        assert_eq!(MetricValue::Counter(12).to_string(), "12");
        assert_eq!(MetricValue::Gauge(6.1).to_string(), "6.1");
        assert_eq!(MetricValue::Gauge(5.0).to_string(), "5");
        assert_eq!(MetricValue::Gauge(1e21).to_string(), "1000000000000000000000");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("counter".parse::<MetricKind>().unwrap(), MetricKind::Counter);
        assert!("Counter".parse::<MetricKind>().is_err());
    }
}
