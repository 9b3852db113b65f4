//! In-memory metric store
//!
//! The canonical server-side mapping of metric identity to current value.
//! Counters and gauges live behind separate locks; operations touching both
//! kinds always take the counter lock first.

use crate::core::types::{Metric, MetricId, MetricKind, MetricValue};
use crate::utils::error::{Result, TelemetryError};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Values overwritten by a batch, used to put the store back as it was.
///
/// Holds the value each identity had before its first write in the batch.
#[derive(Debug, Default)]
pub struct UndoLog {
    previous: HashMap<MetricId, Option<MetricValue>>,
}

impl UndoLog {
    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }

    pub fn len(&self) -> usize {
        self.previous.len()
    }
}

/// Typed metric store with kind-specific merge rules
#[derive(Debug, Default)]
pub struct MetricStore {
    counters: Mutex<HashMap<String, i64>>,
    gauges: Mutex<HashMap<String, f64>>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for `id`; unknown identities are [`TelemetryError::NotFound`].
    pub fn get(&self, id: &MetricId) -> Result<Metric> {
        let value = match id.kind {
            MetricKind::Counter => self.counters.lock().get(&id.name).copied().map(MetricValue::Counter),
            MetricKind::Gauge => self.gauges.lock().get(&id.name).copied().map(MetricValue::Gauge),
        };

        value
            .map(|value| Metric::new(id.name.clone(), value))
            .ok_or_else(|| TelemetryError::not_found(format!("metric {} is unknown", id)))
    }

    /// Every stored metric, ordered by name then kind.
    pub fn list(&self) -> Vec<Metric> {
        let counters = self.counters.lock();
        let gauges = self.gauges.lock();

        let mut metrics: Vec<Metric> = counters
            .iter()
            .map(|(name, v)| Metric::counter(name.clone(), *v))
            .chain(gauges.iter().map(|(name, v)| Metric::gauge(name.clone(), *v)))
            .collect();
        drop(gauges);
        drop(counters);

        metrics.sort_by(|a, b| a.name.cmp(&b.name).then(a.kind().cmp(&b.kind())));
        metrics
    }

    pub fn len(&self) -> usize {
        self.counters.lock().len() + self.gauges.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge one sample and return the stored result.
    pub fn update(&self, metric: &Metric) -> Metric {
        let stored = match metric.value {
            MetricValue::Counter(delta) => {
                let mut counters = self.counters.lock();
                let entry = counters.entry(metric.name.clone()).or_insert(0);
                *entry = entry.wrapping_add(delta);
                MetricValue::Counter(*entry)
            }
            MetricValue::Gauge(value) => {
                self.gauges.lock().insert(metric.name.clone(), value);
                MetricValue::Gauge(value)
            }
        };
        Metric::new(metric.name.clone(), stored)
    }

    /// Merge a batch in input order.
    ///
    /// Both locks are held for the whole batch, so readers observe either none
    /// or all of it.
    pub fn update_batch(&self, batch: &[Metric]) {
        let mut counters = self.counters.lock();
        let mut gauges = self.gauges.lock();

        for metric in batch {
            match metric.value {
                MetricValue::Counter(delta) => {
                    let entry = counters.entry(metric.name.clone()).or_insert(0);
                    *entry = entry.wrapping_add(delta);
                }
                MetricValue::Gauge(value) => {
                    gauges.insert(metric.name.clone(), value);
                }
            }
        }
    }

    /// Like [`MetricStore::update_batch`], recording what the batch replaced.
    pub fn apply_batch(&self, batch: &[Metric]) -> UndoLog {
        let mut counters = self.counters.lock();
        let mut gauges = self.gauges.lock();
        let mut undo = UndoLog::default();

        for metric in batch {
            match metric.value {
                MetricValue::Counter(delta) => {
                    let previous = counters.get(&metric.name).copied();
                    undo.previous
                        .entry(metric.id())
                        .or_insert(previous.map(MetricValue::Counter));
                    counters.insert(metric.name.clone(), previous.unwrap_or(0).wrapping_add(delta));
                }
                MetricValue::Gauge(value) => {
                    let previous = gauges.insert(metric.name.clone(), value);
                    undo.previous
                        .entry(metric.id())
                        .or_insert(previous.map(MetricValue::Gauge));
                }
            }
        }

        undo
    }

    /// Restore the values recorded by [`MetricStore::apply_batch`].
    ///
    /// Only sound while no other writer touched those identities in between.
    pub fn revert(&self, undo: UndoLog) {
        let mut counters = self.counters.lock();
        let mut gauges = self.gauges.lock();

        for (id, previous) in undo.previous {
            match (id.kind, previous) {
                (MetricKind::Counter, Some(MetricValue::Counter(v))) => {
                    counters.insert(id.name, v);
                }
                (MetricKind::Counter, _) => {
                    counters.remove(&id.name);
                }
                (MetricKind::Gauge, Some(MetricValue::Gauge(v))) => {
                    gauges.insert(id.name, v);
                }
                (MetricKind::Gauge, _) => {
                    gauges.remove(&id.name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_accumulates() {
        let store = MetricStore::new();
        store.update(&Metric::counter("hits", 5));
        let stored = store.update(&Metric::counter("hits", 7));

        assert_eq!(stored, Metric::counter("hits", 12));
        assert_eq!(store.get(&MetricId::counter("hits")).unwrap(), Metric::counter("hits", 12));
    }

    #[test]
    fn test_counter_sum_is_order_independent() {
        let deltas = [3i64, -8, 21, 0, 13, 5, -2];
        let forward = MetricStore::new();
        let backward = MetricStore::new();

        for d in deltas {
            forward.update(&Metric::counter("c", d));
        }
        for d in deltas.iter().rev() {
            backward.update(&Metric::counter("c", *d));
        }

        let expected = Metric::counter("c", deltas.iter().sum());
        assert_eq!(forward.get(&MetricId::counter("c")).unwrap(), expected);
        assert_eq!(backward.get(&MetricId::counter("c")).unwrap(), expected);
    }

    #[test]
    fn test_gauge_keeps_last_value() {
        let store = MetricStore::new();
        for v in [5.5, 1.0, 6.1] {
            store.update(&Metric::gauge("temp", v));
        }
        assert_eq!(store.get(&MetricId::gauge("temp")).unwrap(), Metric::gauge("temp", 6.1));
    }

    #[test]
    fn test_same_name_different_kinds_are_distinct() {
        let store = MetricStore::new();
        store.update(&Metric::counter("x", 1));
        store.update(&Metric::gauge("x", 2.5));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&MetricId::counter("x")).unwrap().value, MetricValue::Counter(1));
        assert_eq!(store.get(&MetricId::gauge("x")).unwrap().value, MetricValue::Gauge(2.5));
    }

    #[test]
    fn test_unknown_identity_is_not_found() {
        let store = MetricStore::new();
        store.update(&Metric::counter("hits", 1));

        let err = store.get(&MetricId::gauge("hits")).unwrap_err();
        assert!(matches!(err, TelemetryError::NotFound(_)));
        assert!(store.get(&MetricId::counter("misses")).is_err());
    }

    #[test]
    fn test_batch_applies_in_order() {
        let store = MetricStore::new();
        store.update_batch(&[
            Metric::counter("c", 1),
            Metric::gauge("g", 1.0),
            Metric::counter("c", 2),
            Metric::gauge("g", 9.5),
        ]);

        assert_eq!(
            store.list(),
            vec![Metric::counter("c", 3), Metric::gauge("g", 9.5)]
        );
    }

    #[test]
    fn test_revert_restores_previous_state() {
        let store = MetricStore::new();
        store.update(&Metric::counter("c", 10));
        store.update(&Metric::gauge("g", 1.0));
        let before = store.list();

        let undo = store.apply_batch(&[
            Metric::counter("c", 5),
            Metric::counter("c", 5),
            Metric::gauge("g", 2.0),
            Metric::gauge("new", 3.0),
        ]);
        assert!(!undo.is_empty());
        assert_eq!(store.get(&MetricId::counter("c")).unwrap().value, MetricValue::Counter(20));

        store.revert(undo);
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_large_batch_records_each_identity_once() {
        let store = MetricStore::new();
        let batch: Vec<Metric> = (0..100_000)
            .map(|i| Metric::gauge(format!("g{}", i % 50_000), i as f64))
            .collect();

        let started = std::time::Instant::now();
        let undo = store.apply_batch(&batch);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));

        assert_eq!(undo.len(), 50_000);
        assert_eq!(store.get(&MetricId::gauge("g0")).unwrap().value, MetricValue::Gauge(50_000.0));

        store.revert(undo);
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_batch_matches_apply_batch() {
        let batch = [
            Metric::counter("c", 2),
            Metric::gauge("g", 1.5),
            Metric::counter("c", 3),
        ];
        let plain = MetricStore::new();
        let logged = MetricStore::new();

        plain.update_batch(&batch);
        logged.apply_batch(&batch);
        assert_eq!(plain.list(), logged.list());
    }

    #[test]
    fn test_list_is_sorted() {
        let store = MetricStore::new();
        store.update(&Metric::gauge("b", 1.0));
        store.update(&Metric::counter("a", 1));
        store.update(&Metric::gauge("a", 1.0));

        let names: Vec<_> = store
            .list()
            .into_iter()
            .map(|m| {
                let kind = m.kind();
                (m.name, kind)
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("a".to_string(), MetricKind::Counter),
                ("a".to_string(), MetricKind::Gauge),
                ("b".to_string(), MetricKind::Gauge),
            ]
        );
    }
}
