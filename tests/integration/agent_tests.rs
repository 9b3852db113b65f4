//! Agent delivery into a running metrics server

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::TestServer;
    use std::sync::Arc;
    use telemetry_rs::agent::{DeliveryPipeline, HttpTransport, MetricSnapshot, RuntimeSampler};
    use telemetry_rs::config::AgentConfig;
    use telemetry_rs::core::types::{Metric, MetricId};

    fn agent_config(server: &TestServer, key: Option<&str>, batch: bool) -> AgentConfig {
        AgentConfig {
            address: server.address.clone(),
            key: key.map(str::to_string),
            batch,
            rate_limit: 3,
            ..Default::default()
        }
    }

    fn pipeline(config: &AgentConfig) -> DeliveryPipeline {
        let transport = Arc::new(HttpTransport::new(config).unwrap());
        DeliveryPipeline::new(transport, config.rate_limit, config.queue_capacity, config.batch)
    }

    #[actix_web::test]
    async fn test_poll_count_after_three_ticks() {
        let server = TestServer::start(Some("shared-key")).await;
        let config = agent_config(&server, Some("shared-key"), false);

        let sampler = RuntimeSampler::new();
        let snapshot = MetricSnapshot::new();
        for _ in 0..3 {
            sampler.sample_into(&snapshot);
        }

        let summary = pipeline(&config).deliver(snapshot.drain_for_report()).await;
        assert_eq!(summary.failed, 0);

        let body = assert_ok!(
            assert_ok!(reqwest::get(server.url("/value/counter/PollCount")).await)
                .text()
                .await
        );
        assert_eq!(body, "3");

        server.stop().await;
    }

    #[actix_web::test]
    async fn test_batch_reports_accumulate_on_server() {
        let server = TestServer::start(None).await;
        let config = agent_config(&server, None, true);
        let pipeline = pipeline(&config);

        for _ in 0..2 {
            let summary = pipeline
                .deliver(vec![Metric::counter("hits", 5), Metric::gauge("temp", 5.5)])
                .await;
            assert_eq!(summary.delivered, 1);
        }

        assert_eq!(
            assert_ok!(server.storage.get(&MetricId::counter("hits")).await),
            Metric::counter("hits", 10)
        );
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_wrong_key_is_rejected_without_retry() {
        let server = TestServer::start(Some("server-key")).await;
        let config = agent_config(&server, Some("agent-key"), false);

        let summary = pipeline(&config)
            .deliver(vec![Metric::gauge("temp", 1.0), Metric::gauge("load", 2.0)])
            .await;

        assert_eq!(summary.failed, 2);
        assert!(server.storage.list().await.is_empty());
        server.stop().await;
    }
}
