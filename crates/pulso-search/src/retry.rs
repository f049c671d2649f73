//! Exponential back-off for rate-limited searches.
//!
//! Only [`SearchError::RateLimited`] is retried. Every other error is
//! returned on first sight. Each rate-limited attempt is followed by its
//! wait; once the last attempt's wait has elapsed the run gives up with
//! [`SearchError::RateLimitExceeded`].

use std::future::Future;
use std::time::Duration;

use crate::error::SearchError;

/// Attempt budget and wait schedule for rate-limited searches.
///
/// With the defaults (3 attempts, 60 s base) the waits are 60 s, 120 s and
/// 240 s, so a sustained rate limit costs about seven minutes per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Total calls to the search service, first one included.
    pub max_attempts: u32,
    /// Wait after the first rate-limited attempt; doubles for each later one.
    pub base_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(60),
        }
    }
}

impl BackoffPolicy {
    /// A zero `max_attempts` is treated as one attempt.
    #[must_use]
    pub fn from_secs(max_attempts: u32, base_secs: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(base_secs),
        }
    }

    /// Wait after rate-limited attempt number `attempt` (1-based):
    /// `base_delay * 2^(attempt - 1)`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor)
    }

    /// Every wait the policy can impose, in order.
    pub fn schedule(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..=self.max_attempts.max(1)).map(|attempt| self.delay_for(attempt))
    }
}

pub(crate) fn is_retriable(err: &SearchError) -> bool {
    matches!(err, SearchError::RateLimited { .. })
}

/// Runs `operation`, retrying rate-limited attempts per `policy`.
///
/// # Errors
///
/// - [`SearchError::RateLimitExceeded`] once all `policy.max_attempts`
///   attempts were rate limited and the final wait has elapsed.
/// - Any non-rate-limit error from `operation`, unchanged and without retry.
pub async fn retry_rate_limited<T, F, Fut>(
    policy: &BackoffPolicy,
    mut operation: F,
) -> Result<T, SearchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SearchError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) => return Err(err),
            Err(err) => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "search rate limited; backing off"
                );
                tokio::time::sleep(delay).await;
                if attempt >= max_attempts {
                    tracing::error!(attempts = attempt, "search rate limit attempts exhausted");
                    return Err(SearchError::RateLimitExceeded { attempts: attempt });
                }
            }
        }
    }
}
