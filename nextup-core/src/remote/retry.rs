//! Bounded exponential backoff for transient remote failures.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::client::RemoteError;

/// Retry schedule for catalog fetches: `max_attempts` total calls, with
/// the inter-call delay doubling from `initial_delay` up to `max_delay`.
///
/// Only transient failures (HTTP 429, 5xx, transport errors) are retried;
/// everything else propagates from the first attempt.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(4_000),
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds, fails permanently, or the attempt
    /// budget is spent. The final attempt's error propagates as-is.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, RemoteError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        let mut delay = self.initial_delay;
        let mut attempt = 1u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(attempt, delay_ms = delay.as_millis() as u64, error = %err,
                        "transient fetch failure, backing off");
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(self.max_delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
