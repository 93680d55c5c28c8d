//! Bounded exponential-backoff retry for provider calls.
//!
//! Each attempt is classified into an [`AttemptOutcome`]; only retriable failures
//! (rate limits, timeouts, aborted calls) are attempted again, after waiting
//! `base_delay * 2^attempt_index`. Anything else is returned on first occurrence.

use super::provider_error::ProviderError;
use std::future::Future;
use std::time::Duration;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Retry configuration applied to every remote provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each further attempt
    pub base_delay: Duration,
    /// Deadline for a single attempt. An attempt that exceeds it is dropped and
    /// reported as [`ProviderError::Timeout`].
    pub attempt_timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            attempt_timeout: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            attempt_timeout: None,
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    /// Wait before the attempt following `attempt_index` (0-based)
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt_index);
        self.base_delay.saturating_mul(factor)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Classification of a single attempt
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    Success(T),
    Retriable(ProviderError),
    Fatal(ProviderError),
}

/// Classify the result of one provider attempt
pub fn classify<T>(result: Result<T, ProviderError>) -> AttemptOutcome<T> {
    match result {
        Ok(value) => AttemptOutcome::Success(value),
        Err(err) => {
            let err = err.normalized();
            if err.is_retriable() {
                AttemptOutcome::Retriable(err)
            } else {
                AttemptOutcome::Fatal(err)
            }
        }
    }
}

/// Run `operation` under `policy`, retrying retriable failures with backoff.
///
/// Returns the first success, the first fatal error, or the last retriable error
/// once all attempts are spent.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let attempts = policy.attempts();
    let mut last_error = None;

    for attempt in 0..attempts {
        let result = match policy.attempt_timeout {
            Some(limit) => match tokio::time::timeout(limit, operation()).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(format!(
                    "{} timed out after {}ms",
                    operation_name,
                    limit.as_millis()
                ))),
            },
            None => operation().await,
        };

        match classify(result) {
            AttemptOutcome::Success(value) => {
                if attempt > 0 {
                    tracing::info!(
                        attempt = attempt + 1,
                        operation = operation_name,
                        "Provider call succeeded after retry"
                    );
                }
                return Ok(value);
            }
            AttemptOutcome::Fatal(err) => {
                tracing::error!(
                    error = %err,
                    operation = operation_name,
                    "Provider call failed with non-retriable error"
                );
                return Err(err);
            }
            AttemptOutcome::Retriable(err) => {
                if attempt + 1 < attempts {
                    let delay = policy.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        operation = operation_name,
                        "Provider call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                last_error = Some(err);
            }
        }
    }

    let error = last_error
        .unwrap_or_else(|| ProviderError::Other(format!("{} made no attempts", operation_name)));
    tracing::error!(
        attempts = attempts,
        error = %error,
        operation = operation_name,
        "Provider call failed after all retry attempts"
    );
    Err(error)
}
