use std::future::Future;
use std::time::Duration;

use super::error::{ApiError, MAX_RETRY_AFTER};

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// A single attempt, for requests that must not be repeated
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before attempt `attempt + 1`, doubling each time
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Run `operation` until it succeeds, fails permanently, or runs out of attempts.
///
/// Transient failures (5xx, 429, network) are retried with exponential
/// backoff. A 429 waits for the server's `Retry-After` instead, unless that
/// exceeds [`MAX_RETRY_AFTER`], in which case the error is returned at once.
pub async fn execute_with_retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                let delay = match err.retry_after() {
                    Some(wait) if wait > MAX_RETRY_AFTER => return Err(err),
                    Some(wait) => wait,
                    None => policy.backoff(attempt),
                };
                tracing::warn!(attempt, ?delay, error = %err, "transient API failure, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
