//! Token bucket shared by every caller of one resolver.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::{Instant, sleep};

/// Smallest refill rate honoured, in tokens per second.
const MIN_REFILL_PER_SECOND: f64 = 1e-3;

/// Capacity and refill rate of the resolver's token bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitConfig {
    /// Maximum number of stored tokens; also the initial fill.
    pub capacity: u32,
    /// Tokens accrued per second.
    pub refill_per_second: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            refill_per_second: 5.0,
        }
    }
}

impl RateLimitConfig {
    /// Create a configuration with the given capacity and refill rate.
    #[must_use]
    pub const fn new(capacity: u32, refill_per_second: f64) -> Self {
        Self {
            capacity,
            refill_per_second,
        }
    }
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Token bucket on the tokio clock.
///
/// [`acquire`](Self::acquire) suspends until a token is available. Waiting
/// callers are not queued; whichever wakes first after a refill wins.
#[derive(Debug)]
pub(crate) struct TokenBucket {
    capacity: f64,
    refill_per_second: f64,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    pub(crate) fn new(config: RateLimitConfig) -> Self {
        let capacity = f64::from(config.capacity.max(1));
        let refill_per_second = if config.refill_per_second.is_finite() {
            config.refill_per_second.max(MIN_REFILL_PER_SECOND)
        } else {
            MIN_REFILL_PER_SECOND
        };
        Self {
            capacity,
            refill_per_second,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Take one token, sleeping while the bucket is empty.
    pub(crate) async fn acquire(&self) {
        loop {
            let wait = match self.try_take() {
                Ok(()) => return,
                Err(wait) => wait,
            };
            log::debug!("rate limit reached; waiting {wait:?} for a token");
            sleep(wait).await;
        }
    }

    /// Take a token if one is available, otherwise report how long until one
    /// accrues.
    fn try_take(&self) -> Result<(), Duration> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();
        state.tokens = (state.tokens + elapsed * self.refill_per_second).min(self.capacity);
        state.last_refill = now;

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            Ok(())
        } else {
            let missing = 1.0 - state.tokens;
            Err(Duration::from_secs_f64(missing / self.refill_per_second))
        }
    }

    /// Tokens currently stored, without refilling.
    #[cfg(test)]
    fn available(&self) -> f64 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn starts_full_and_drains_without_waiting() {
        let bucket = TokenBucket::new(RateLimitConfig::new(3, 1.0));
        let start = Instant::now();

        for _ in 0..3 {
            bucket.acquire().await;
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(bucket.available() < 1.0);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn empty_bucket_waits_for_refill() {
        let bucket = TokenBucket::new(RateLimitConfig::new(1, 2.0));
        bucket.acquire().await;
        let start = Instant::now();

        bucket.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn refill_never_exceeds_capacity() {
        let bucket = TokenBucket::new(RateLimitConfig::new(2, 10.0));
        bucket.acquire().await;
        sleep(Duration::from_secs(60)).await;

        assert!(bucket.try_take().is_ok());
        assert!(bucket.try_take().is_ok());
        assert!(bucket.try_take().is_err());
    }

    #[rstest]
    #[case(0, 5.0)]
    #[case(5, 0.0)]
    #[case(5, f64::NAN)]
    #[tokio::test(start_paused = true)]
    async fn degenerate_configuration_still_grants_a_token(
        #[case] capacity: u32,
        #[case] refill: f64,
    ) {
        let bucket = TokenBucket::new(RateLimitConfig::new(capacity, refill));

        assert!(bucket.try_take().is_ok());
    }
}
