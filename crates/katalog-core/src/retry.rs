//! Shared retry executor with exponential backoff.
//!
//! This is the one retry primitive in the codebase; every transport call goes
//! through it. The executor knows nothing about what the operation does: it
//! runs it, and on failure waits `initial_delay * 2^attempt` before trying
//! again, up to `max_retries` retries after the initial attempt. Exhaustion
//! re-raises the last error; no default value is ever synthesized.
//!
//! Delay growth is unbounded by default, matching the historical behavior.
//! [`RetryPolicy::max_delay`] caps individual delays for callers that want
//! bounded wall-clock cost.

use crate::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry knobs for [`execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt; total attempts are `max_retries + 1`.
    pub max_retries: u32,
    /// Delay before the first retry. Doubles on each subsequent retry.
    pub initial_delay: Duration,
    /// Optional ceiling for any single delay.
    pub max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: None,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries, for callers that want a single attempt.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: None,
        }
    }

    /// Backoff delay before retry number `attempt` (zero-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        let delay = self.initial_delay.saturating_mul(factor);
        self.max_delay.map_or(delay, |cap| delay.min(cap))
    }
}

/// Runs `operation`, retrying failures with exponential backoff per `policy`.
///
/// Each retry emits a `warn!` diagnostic with the attempt number, remaining
/// retries, the upcoming delay, and the error; diagnostics never affect
/// control flow. The last error is returned once retries are exhausted.
pub async fn execute<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_retries => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    remaining = policy.max_retries - attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transport operation failed, retrying after backoff"
                );
                sleep(delay).await;
                attempt += 1;
            },
            Err(err) => return Err(err),
        }
    }
}
