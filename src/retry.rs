//! Fixed-delay retry for requests blocked by an anti-bot challenge.

use std::{future::Future, time::Duration};

use log::{info, warn};

use crate::error::BlinkistError;

#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub wait_time: Duration,
}

/// Classifies errors that are worth another attempt.
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for BlinkistError {
    fn is_retryable(&self) -> bool {
        matches!(self, BlinkistError::Challenge { .. })
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// `max_attempts` attempts have been made. The last error is returned as is.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    info!("Request succeeded on attempt {}", attempt);
                }
                return Ok(result);
            }
            Err(err) if err.is_retryable() && attempt < config.max_attempts => {
                warn!(
                    "{} (attempt {}/{}). Retrying in {} seconds...",
                    err,
                    attempt,
                    config.max_attempts,
                    config.wait_time.as_secs_f64()
                );
                tokio::time::sleep(config.wait_time).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
