//! Retry with exponential backoff.
//!
//! [`execute_with_retry`] makes at most `max_attempts` calls, sleeping
//! `backoff_base^attempt` seconds after each failed attempt except the last
//! (attempt counted from 0). The guarantee is exactly one successful return
//! or exactly one propagated failure; nothing is swallowed. Interruption is
//! never retried, and backoff sleeps race against the shutdown handle.

use crate::ports::shutdown::Shutdown;
use crate::ports::sleeper::{Sleeper, sleep_unless_shutdown};
use rolerun_domain::AgentError;
use std::time::Duration;
use tracing::{info, warn};

/// Attempt budget and backoff growth for one retried operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Clamped to at least 1.
    pub max_attempts: u32,
    /// Base of the exponential backoff, in seconds.
    pub backoff_base: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: f64) -> Self {
        Self {
            max_attempts,
            backoff_base,
        }
    }

    /// Delay inserted after the given zero-based failed attempt. Saturates
    /// at `Duration::MAX` once the exponent leaves the representable range.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let secs = self.backoff_base.max(0.0).powi(attempt as i32);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Invoke `operation`, retrying failed attempts per `policy`.
pub async fn execute_with_retry<T, F, Fut>(
    label: &str,
    policy: RetryPolicy,
    sleeper: &dyn Sleeper,
    shutdown: &Shutdown,
    mut operation: F,
) -> Result<T, AgentError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AgentError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_interrupted() => return Err(err),
            Err(err) => {
                warn!(
                    label,
                    attempt = attempt + 1,
                    max_attempts,
                    error = %err,
                    "attempt failed"
                );
                if attempt + 1 >= max_attempts {
                    return Err(err);
                }
                let wait = policy.backoff_delay(attempt);
                info!(label, wait_secs = wait.as_secs_f64(), "retrying after backoff");
                sleep_unless_shutdown(sleeper, wait, shutdown).await?;
                attempt += 1;
            }
        }
    }
}
