//! Retry mechanism with linear backoff

use super::types::RetryConfig;
use crate::utils::error::TelemetryError;
use tracing::{debug, warn};

/// Retry mechanism with linear backoff and fault classification
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute `f`, retrying every failure until attempts run out.
    pub async fn call<F, Fut, R>(&self, f: F) -> Result<R, TelemetryError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<R, TelemetryError>>,
    {
        self.call_if(f, |_| true).await
    }

    /// Execute `f`, retrying only failures accepted by `should_retry`.
    ///
    /// A rejected failure is returned unchanged on the spot. Running out of
    /// attempts wraps the last failure in [`TelemetryError::RetryExhausted`].
    pub async fn call_if<F, Fut, R, P>(&self, mut f: F, should_retry: P) -> Result<R, TelemetryError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<R, TelemetryError>>,
        P: Fn(&TelemetryError) -> bool,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match f().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Retry succeeded on attempt {}", attempt);
                    }
                    return Ok(result);
                }
                Err(error) if !should_retry(&error) => return Err(error),
                Err(error) => {
                    if attempt >= max_attempts {
                        warn!("Giving up after {} attempts: {}", attempt, error);
                        return Err(TelemetryError::retry_exhausted(attempt, error));
                    }

                    let delay = self.config.delay_for(attempt);
                    debug!(
                        "Attempt {} failed: {}, retrying in {:?}",
                        attempt, error, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
