//! Types and configurations for error recovery patterns

use std::time::Duration;

/// Retry configuration
///
/// Delays grow linearly: the first retry waits `initial_delay`, each later one
/// waits `delay_increment` longer, never exceeding `max_delay` when set.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Added to the delay after every retry
    pub delay_increment: Duration,
    /// Upper bound on a single delay
    pub max_delay: Option<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            delay_increment: Duration::ZERO,
            max_delay: None,
        }
    }
}

impl RetryConfig {
    /// Delay to wait before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let delay = self
            .delay_increment
            .saturating_mul(retry.saturating_sub(1))
            .saturating_add(self.initial_delay);
        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }
}
