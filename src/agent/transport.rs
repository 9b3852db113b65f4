//! HTTP delivery of metric payloads
//!
//! Every request body is JSON, signed before compression when a key is set,
//! then gzipped. Failed attempts are retried with linear backoff unless the
//! server rejected the payload itself.

use crate::config::AgentConfig;
use crate::core::types::Metric;
use crate::utils::crypto::{PayloadSigner, SIGNATURE_HEADER};
use crate::utils::error::{Result, RetryPolicy, TelemetryError};
use crate::utils::net::gzip;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE};
use tracing::debug;

/// Unit of work handed to a delivery worker
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// One metric, sent to `/update/`
    Single(Metric),
    /// A whole report, sent to `/updates/`
    Batch(Vec<Metric>),
}

impl Delivery {
    pub fn path(&self) -> &'static str {
        match self {
            Delivery::Single(_) => "/update/",
            Delivery::Batch(_) => "/updates/",
        }
    }

    /// Number of metrics carried
    pub fn len(&self) -> usize {
        match self {
            Delivery::Single(_) => 1,
            Delivery::Batch(metrics) => metrics.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let body = match self {
            Delivery::Single(metric) => serde_json::to_vec(metric)?,
            Delivery::Batch(metrics) => serde_json::to_vec(metrics)?,
        };
        Ok(body)
    }
}

/// Sends one delivery, retries included
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, delivery: &Delivery) -> Result<()>;
}

/// Failures worth another attempt: the request never completed or the
/// server failed on its side.
pub fn is_retryable(error: &TelemetryError) -> bool {
    matches!(
        error,
        TelemetryError::HttpClient(_) | TelemetryError::Transport(_)
    )
}

/// reqwest-backed [`Transport`]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    signer: PayloadSigner,
    retry: RetryPolicy,
}

impl HttpTransport {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        // gzip() sends `Accept-Encoding: gzip` and decodes compressed replies
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .build()
            .map_err(|e| TelemetryError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            signer: PayloadSigner::new(config.key.as_deref()),
            retry: RetryPolicy::new(config.retry.to_retry_config()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_once(&self, url: &str, body: Bytes, signature: Option<&str>) -> Result<()> {
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_ENCODING, "gzip")
            .body(body);
        if let Some(signature) = signature {
            request = request.header(SIGNATURE_HEADER, signature);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            Err(TelemetryError::validation(format!(
                "server rejected payload with {}: {}",
                status,
                detail.trim()
            )))
        } else {
            Err(TelemetryError::transport(format!(
                "server answered {}: {}",
                status,
                detail.trim()
            )))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, delivery: &Delivery) -> Result<()> {
        let json = delivery.encode()?;
        let signature = self.signer.sign(&json)?;
        // shared across retries without copying
        let body = Bytes::from(gzip(&json)?);
        let url = format!("{}{}", self.endpoint, delivery.path());

        debug!(
            "Posting {} metrics ({} bytes compressed) to {}",
            delivery.len(),
            body.len(),
            url
        );

        self.retry
            .call_if(
                || self.post_once(&url, body.clone(), signature.as_deref()),
                is_retryable,
            )
            .await
    }
}
