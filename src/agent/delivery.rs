//! Bounded fan-out of a report across delivery workers
//!
//! Each report round gets a fresh bounded queue and exactly `workers` tasks
//! that drain it until it closes. A failed delivery is logged and dropped;
//! nothing is buffered for the next round.

use super::transport::{Delivery, Transport};
use crate::core::types::Metric;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Outcome of one report round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub delivered: usize,
    pub failed: usize,
}

/// Worker pool that pushes reports through a [`Transport`]
pub struct DeliveryPipeline {
    transport: Arc<dyn Transport>,
    workers: usize,
    queue_capacity: usize,
    batch: bool,
}

impl DeliveryPipeline {
    pub fn new(transport: Arc<dyn Transport>, workers: usize, queue_capacity: usize, batch: bool) -> Self {
        Self {
            transport,
            workers: workers.max(1),
            queue_capacity: queue_capacity.max(1),
            batch,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Split a report into deliveries for the configured transport shape
    pub fn plan(&self, report: Vec<Metric>) -> Vec<Delivery> {
        if report.is_empty() {
            Vec::new()
        } else if self.batch {
            vec![Delivery::Batch(report)]
        } else {
            report.into_iter().map(Delivery::Single).collect()
        }
    }

    /// Deliver `report` and wait until every worker has finished
    pub async fn deliver(&self, report: Vec<Metric>) -> RoundSummary {
        let deliveries = self.plan(report);
        if deliveries.is_empty() {
            debug!("Nothing to report");
            return RoundSummary::default();
        }

        let (tx, rx) = mpsc::channel::<Delivery>(self.queue_capacity);
        let rx = Arc::new(Mutex::new(rx));

        let mut workers = JoinSet::new();
        for worker_id in 0..self.workers {
            workers.spawn(run_worker(worker_id, rx.clone(), self.transport.clone()));
        }

        let total = deliveries.len();
        for delivery in deliveries {
            if tx.send(delivery).await.is_err() {
                warn!("Delivery queue closed early");
                break;
            }
        }
        drop(tx);

        let mut summary = RoundSummary::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(worker) => {
                    summary.delivered += worker.delivered;
                    summary.failed += worker.failed;
                }
                Err(e) => warn!("Delivery worker stopped abnormally: {}", e),
            }
        }

        info!(
            "Report round done: {} of {} deliveries succeeded",
            summary.delivered, total
        );
        summary
    }
}

async fn run_worker(
    worker_id: usize,
    queue: Arc<Mutex<mpsc::Receiver<Delivery>>>,
    transport: Arc<dyn Transport>,
) -> RoundSummary {
    let mut summary = RoundSummary::default();

    loop {
        // the lock is released before sending so other workers keep draining
        let next = queue.lock().await.recv().await;
        let Some(delivery) = next else {
            break;
        };

        match transport.send(&delivery).await {
            Ok(()) => summary.delivered += 1,
            Err(e) => {
                summary.failed += 1;
                warn!(
                    "Worker {} dropped {} metrics to {}: {}",
                    worker_id,
                    delivery.len(),
                    delivery.path(),
                    e
                );
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{Result, TelemetryError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Tracks the highest number of concurrent sends
    #[derive(Default)]
    struct SlowTransport {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        sent: AtomicUsize,
        fail_gauges: bool,
    }

    #[async_trait]
    impl Transport for SlowTransport {
        async fn send(&self, delivery: &Delivery) -> Result<()> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.sent.fetch_add(1, Ordering::SeqCst);

            match delivery {
                Delivery::Single(metric) if self.fail_gauges && metric.name.starts_with('g') => {
                    Err(TelemetryError::transport("unreachable"))
                }
                _ => Ok(()),
            }
        }
    }

    fn report(n: usize) -> Vec<Metric> {
        (0..n).map(|i| Metric::gauge(format!("g{}", i), i as f64)).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_never_exceeds_worker_count() {
        let transport = Arc::new(SlowTransport::default());
        let pipeline = DeliveryPipeline::new(transport.clone(), 3, 4, false);

        let summary = pipeline.deliver(report(20)).await;

        assert_eq!(summary.delivered, 20);
        assert_eq!(transport.sent.load(Ordering::SeqCst), 20);
        assert_eq!(transport.max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_dropped_not_fatal() {
        let transport = Arc::new(SlowTransport {
            fail_gauges: true,
            ..Default::default()
        });
        let pipeline = DeliveryPipeline::new(transport.clone(), 2, 8, false);

        let mut metrics = report(3);
        metrics.push(Metric::counter("PollCount", 1));
        let summary = pipeline.deliver(metrics).await;

        assert_eq!(summary, RoundSummary { delivered: 1, failed: 3 });
    }

    #[tokio::test]
    async fn test_batch_mode_sends_one_request() {
        let transport = Arc::new(SlowTransport::default());
        let pipeline = DeliveryPipeline::new(transport.clone(), 4, 8, true);

        let summary = pipeline.deliver(report(10)).await;

        assert_eq!(summary.delivered, 1);
        assert_eq!(transport.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_report_sends_nothing() {
        let transport = Arc::new(SlowTransport::default());
        let pipeline = DeliveryPipeline::new(transport.clone(), 2, 8, true);

        assert_eq!(pipeline.deliver(Vec::new()).await, RoundSummary::default());
        assert_eq!(transport.sent.load(Ordering::SeqCst), 0);
    }
}
