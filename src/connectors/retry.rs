// src/connectors/retry.rs
//! Bounded retry with exponential backoff for signed calls.
//!
//! Only errors classified as retryable by [`ApiError::is_retryable`] are
//! attempted again; everything else is returned on the spot.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::ExchangeConfig;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub backoff_unit: Duration,
    pub backoff_factor: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_unit: Duration::from_secs(1),
            backoff_factor: 2,
        }
    }
}

impl From<&ExchangeConfig> for RetryPolicy {
    fn from(config: &ExchangeConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff_unit: Duration::from_millis(config.backoff_unit_ms),
            backoff_factor: config.backoff_factor,
        }
    }
}

impl RetryPolicy {
    pub fn single_attempt(&self) -> Self {
        Self {
            max_attempts: 1,
            ..self.clone()
        }
    }

    /// Wait after the `attempt`-th failure (1-based): unit * factor^(attempt-1).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff_unit
            .saturating_mul(self.backoff_factor.saturating_pow(exponent))
    }

    pub async fn run<T, F, Fut>(&self, operation_name: &str, mut f: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            match f().await {
                Ok(result) => return Ok(result),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if attempt >= self.max_attempts => {
                    warn!(
                        "[Retry] {} failed after {} attempts: {}",
                        operation_name, attempt, err
                    );
                    return Err(ApiError::RetriesExhausted {
                        attempts: attempt,
                        last: Box::new(err),
                    });
                }
                Err(err) => {
                    let delay = self.delay_after(attempt);
                    debug!(
                        "[Retry] {} attempt {}/{} failed ({}), retrying in {:?}",
                        operation_name, attempt, self.max_attempts, err, delay
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}
