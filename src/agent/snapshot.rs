//! Agent-side metric snapshot shared by the samplers and the delivery loop

use crate::core::types::{Metric, MetricId, MetricValue};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Latest sampled value per metric identity.
///
/// Gauges hold the last sample. Counters accumulate increments until the
/// next report drains them, so each report carries only what happened since
/// the previous one.
#[derive(Debug, Default)]
pub struct MetricSnapshot {
    entries: RwLock<HashMap<MetricId, MetricValue>>,
}

impl MetricSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_gauge(&self, name: &str, value: f64) {
        self.entries
            .write()
            .insert(MetricId::gauge(name), MetricValue::Gauge(value));
    }

    pub fn add_counter(&self, name: &str, delta: i64) {
        let mut entries = self.entries.write();
        let slot = entries
            .entry(MetricId::counter(name))
            .or_insert(MetricValue::Counter(0));
        *slot = slot.merge(MetricValue::Counter(delta));
    }

    /// Apply several samples under one lock acquisition
    pub fn record_all(&self, samples: impl IntoIterator<Item = Metric>) {
        let mut entries = self.entries.write();
        for sample in samples {
            let id = sample.id();
            match sample.value {
                MetricValue::Gauge(_) => {
                    entries.insert(id, sample.value);
                }
                MetricValue::Counter(_) => {
                    let slot = entries.entry(id).or_insert(MetricValue::Counter(0));
                    *slot = slot.merge(sample.value);
                }
            }
        }
    }

    /// Copy of every entry without resetting anything
    pub fn peek(&self) -> Vec<Metric> {
        let entries = self.entries.read();
        let mut metrics: Vec<Metric> = entries
            .iter()
            .map(|(id, value)| Metric::new(id.name.clone(), *value))
            .collect();
        metrics.sort_by(|a, b| a.name.cmp(&b.name));
        metrics
    }

    /// Everything to report this tick.
    ///
    /// Counters are removed and handed out as deltas; gauges stay in place.
    pub fn drain_for_report(&self) -> Vec<Metric> {
        let mut entries = self.entries.write();
        let mut report = Vec::with_capacity(entries.len());

        entries.retain(|id, value| {
            report.push(Metric::new(id.name.clone(), *value));
            matches!(value, MetricValue::Gauge(_))
        });

        report.sort_by(|a, b| a.name.cmp(&b.name));
        report
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate_until_drained() {
        let snapshot = MetricSnapshot::new();
        snapshot.add_counter("PollCount", 1);
        snapshot.add_counter("PollCount", 1);
        snapshot.add_counter("PollCount", 1);

        assert_eq!(snapshot.drain_for_report(), vec![Metric::counter("PollCount", 3)]);
        assert!(snapshot.drain_for_report().is_empty());
    }

    #[test]
    fn test_gauges_survive_drain() {
        let snapshot = MetricSnapshot::new();
        snapshot.record_gauge("Alloc", 10.0);
        snapshot.record_gauge("Alloc", 12.0);
        snapshot.add_counter("PollCount", 1);

        let report = snapshot.drain_for_report();
        assert_eq!(
            report,
            vec![Metric::gauge("Alloc", 12.0), Metric::counter("PollCount", 1)]
        );
        assert_eq!(snapshot.peek(), vec![Metric::gauge("Alloc", 12.0)]);
    }

    #[test]
    fn test_record_all_mixes_kinds() {
        let snapshot = MetricSnapshot::new();
        snapshot.record_all([
            Metric::gauge("RandomValue", 42.0),
            Metric::counter("PollCount", 1),
            Metric::counter("PollCount", 1),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.peek(),
            vec![Metric::counter("PollCount", 2), Metric::gauge("RandomValue", 42.0)]
        );
    }

    #[test]
    fn test_concurrent_writers_share_lock() {
        let snapshot = std::sync::Arc::new(MetricSnapshot::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let snapshot = snapshot.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        snapshot.add_counter("PollCount", 1);
                        snapshot.record_gauge(&format!("Worker{}", i), 1.0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let report = snapshot.drain_for_report();
        assert!(report.contains(&Metric::counter("PollCount", 1000)));
        assert_eq!(report.len(), 5);
    }
}
