//! Agent runtime: two sampling timers and one report timer

use super::delivery::DeliveryPipeline;
use super::sampler::{HostSampler, RuntimeSampler};
use super::snapshot::MetricSnapshot;
use super::transport::{HttpTransport, Transport};
use crate::config::AgentConfig;
use crate::utils::error::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Sampling and delivery tasks sharing one snapshot
pub struct Agent {
    config: AgentConfig,
    snapshot: Arc<MetricSnapshot>,
    pipeline: Arc<DeliveryPipeline>,
}

impl Agent {
    /// Agent delivering over HTTP to the configured endpoint
    pub fn new(config: AgentConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: AgentConfig, transport: Arc<dyn Transport>) -> Self {
        let pipeline = DeliveryPipeline::new(
            transport,
            config.rate_limit,
            config.queue_capacity,
            config.batch,
        );
        Self {
            config,
            snapshot: Arc::new(MetricSnapshot::new()),
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn snapshot(&self) -> Arc<MetricSnapshot> {
        self.snapshot.clone()
    }

    /// Start every timer; the returned handle stops them
    pub fn spawn(&self) -> AgentHandle {
        let runtime = RuntimeSampler::new();
        let snapshot = self.snapshot.clone();
        let poll = spawn_ticker("runtime sampler", self.config.poll_interval(), move || {
            runtime.sample_into(&snapshot);
            async {}
        });

        let host = Arc::new(HostSampler::new());
        let snapshot = self.snapshot.clone();
        let host_poll = spawn_ticker("host sampler", self.config.host_poll_interval(), move || {
            if let Err(e) = host.sample_into(&snapshot) {
                warn!("Host sampling skipped: {}", e);
            }
            async {}
        });

        // Rounds run detached so stopping the timer leaves them to finish
        let pipeline = self.pipeline.clone();
        let snapshot = self.snapshot.clone();
        let report = spawn_ticker("reporter", self.config.report_interval(), move || {
            let report = snapshot.drain_for_report();
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                pipeline.deliver(report).await;
            });
            async {}
        });

        AgentHandle {
            tasks: vec![poll, host_poll, report],
        }
    }

    /// Run until Ctrl-C
    pub async fn run(self) -> Result<()> {
        info!(
            endpoint = %self.config.endpoint(),
            workers = self.pipeline.workers(),
            batch = self.config.batch,
            "Starting metrics agent"
        );

        let handle = self.spawn();
        tokio::signal::ctrl_c().await?;
        info!("Shutdown signal received, stopping timers");
        handle.stop();
        Ok(())
    }
}

/// Running agent tasks
pub struct AgentHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl AgentHandle {
    /// Stop every timer.
    ///
    /// Rounds already started keep running until they finish or the runtime
    /// shuts down.
    pub fn stop(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

/// Run `tick` every `period`, first one `period` from now.
///
/// Each tick is awaited before the next one is scheduled.
fn spawn_ticker<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            debug!("{} tick", name);
            tick().await;
        }
    })
}
