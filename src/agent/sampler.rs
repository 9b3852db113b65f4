//! Metric samplers
//!
//! [`RuntimeSampler`] reads the allocator counters through a fixed table of
//! accessors and adds the synthetic `RandomValue` and `PollCount` metrics.
//! [`HostSampler`] reads host memory and per-CPU utilization.

use super::alloc::AllocStats;
use super::snapshot::MetricSnapshot;
use crate::core::types::Metric;
use rand::Rng;
use tracing::trace;

/// Increments by one on every runtime sample
pub const POLL_COUNT: &str = "PollCount";
/// Uniform gauge in `[0, 100)`
pub const RANDOM_VALUE: &str = "RandomValue";

type StatAccessor = fn(&AllocStats) -> f64;

/// Allocator gauges reported on every runtime sample
const RUNTIME_GAUGES: &[(&str, StatAccessor)] = &[
    ("Alloc", |s| s.allocated as f64),
    // Every allocation goes through the heap allocator, so live heap bytes
    // and live allocated bytes are the same figure.
    ("HeapAlloc", |s| s.allocated as f64),
    ("TotalAlloc", |s| s.total_allocated as f64),
    ("Mallocs", |s| s.mallocs as f64),
    ("Frees", |s| s.frees as f64),
    ("HeapObjects", |s| s.live_objects() as f64),
];

/// Names of every gauge the runtime sampler emits
pub fn runtime_gauge_names() -> impl Iterator<Item = &'static str> {
    RUNTIME_GAUGES
        .iter()
        .map(|(name, _)| *name)
        .chain(std::iter::once(RANDOM_VALUE))
}

/// Samples allocator statistics plus the synthetic metrics
#[derive(Debug, Default)]
pub struct RuntimeSampler;

impl RuntimeSampler {
    pub fn new() -> Self {
        Self
    }

    /// One sample of every runtime metric
    pub fn sample(&self) -> Vec<Metric> {
        let stats = AllocStats::current();
        let mut samples: Vec<Metric> = RUNTIME_GAUGES
            .iter()
            .map(|(name, read)| Metric::gauge(*name, read(&stats)))
            .collect();

        samples.push(Metric::gauge(
            RANDOM_VALUE,
            rand::thread_rng().gen_range(0.0..100.0),
        ));
        samples.push(Metric::counter(POLL_COUNT, 1));
        samples
    }

    /// Sample into `snapshot` under a single lock acquisition
    pub fn sample_into(&self, snapshot: &MetricSnapshot) {
        let samples = self.sample();
        trace!("Recorded {} runtime samples", samples.len());
        snapshot.record_all(samples);
    }
}

#[cfg(feature = "metrics")]
mod host {
    use crate::core::types::Metric;
    use crate::utils::error::{Result, TelemetryError};
    use parking_lot::Mutex;
    use sysinfo::System;

    /// Samples host memory and CPU utilization
    pub struct HostSampler {
        system: Mutex<System>,
    }

    impl HostSampler {
        pub fn new() -> Self {
            let mut system = System::new();
            // the first CPU reading is relative to this one
            system.refresh_cpu_usage();
            Self {
                system: Mutex::new(system),
            }
        }

        pub fn sample(&self) -> Result<Vec<Metric>> {
            if !sysinfo::IS_SUPPORTED_SYSTEM {
                return Err(TelemetryError::internal(
                    "host statistics are not available on this platform",
                ));
            }

            let mut system = self.system.lock();
            system.refresh_memory();
            system.refresh_cpu_usage();

            let total = system.total_memory() as f64;
            let free = system.free_memory() as f64;
            let used_percent = if total > 0.0 {
                system.used_memory() as f64 / total * 100.0
            } else {
                0.0
            };

            let mut samples = vec![
                Metric::gauge("TotalMemory", total),
                Metric::gauge("FreeMemory", free),
                Metric::gauge("UsedPercent", used_percent),
            ];
            samples.extend(system.cpus().iter().enumerate().map(|(i, cpu)| {
                Metric::gauge(format!("CPUutilization{}", i + 1), cpu.cpu_usage() as f64)
            }));
            Ok(samples)
        }
    }
}

#[cfg(not(feature = "metrics"))]
mod host {
    use crate::core::types::Metric;
    use crate::utils::error::{Result, TelemetryError};

    /// Host sampling needs the `metrics` feature
    pub struct HostSampler;

    impl HostSampler {
        pub fn new() -> Self {
            Self
        }

        pub fn sample(&self) -> Result<Vec<Metric>> {
            Err(TelemetryError::config(
                "host sampling requires the `metrics` feature",
            ))
        }
    }
}

pub use host::HostSampler;

impl Default for HostSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSampler {
    /// Sample into `snapshot`; returns the number of gauges written
    pub fn sample_into(&self, snapshot: &MetricSnapshot) -> crate::utils::error::Result<usize> {
        let samples = self.sample()?;
        let count = samples.len();
        snapshot.record_all(samples);
        Ok(count)
    }
}
