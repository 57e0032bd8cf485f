//! Rate limiter for outbound requests to the upstream data provider
//!
//! The upstream API is a shared scraping/caching service, so consecutive
//! requests from this process keep a minimum spacing. The limiter tracks the
//! timestamp of the last outbound call and delays callers until the
//! configured interval has elapsed; it never rejects a call outright.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Default minimum spacing between outbound upstream requests (1 second)
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Enforces a minimum interval between consecutive outbound requests
///
/// One instance is shared per upstream endpoint category. The guarantee is
/// best-effort: the timestamp is read before the delay and written after it,
/// so two callers that race on a cold limiter can both pass the spacing
/// check before either records its request. This mirrors the duplicate-work
/// tolerance of the rest of the proxy (concurrent cache misses also both
/// reach upstream) and is intentionally not serialized.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

impl RateLimiter {
    /// Creates a limiter enforcing the given minimum spacing
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// The configured minimum spacing
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Delays the caller until the minimum interval since the previous
    /// request has elapsed, then records the current time as the last
    /// request timestamp
    ///
    /// Returns immediately when no previous request was made or the interval
    /// has already passed.
    pub async fn throttle(&self) {
        let wait = {
            let last = self.last_request.lock().unwrap_or_else(PoisonError::into_inner);
            last.and_then(|t| self.min_interval.checked_sub(t.elapsed()))
        };

        if let Some(wait) = wait {
            if !wait.is_zero() {
                debug!(wait_ms = wait.as_millis() as u64, "rate limiting outbound request");
                tokio::time::sleep(wait).await;
            }
        }

        *self.last_request.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
    }
}
