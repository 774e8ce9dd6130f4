//! Rate limiting implementation
//!
//! A minimum-interval gate shared by every request that goes through it.
//! The "read last grant, sleep, record new grant" sequence runs under one
//! FIFO-fair async mutex, so concurrent callers are granted passage strictly
//! in arrival order and never closer together than the configured interval.

use crate::types::MIN_REQUEST_INTERVAL;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

static GLOBAL: LazyLock<RateLimiter> = LazyLock::new(|| RateLimiter::new(MIN_REQUEST_INTERVAL));

/// Minimum-interval rate limiter
///
/// Clones share state: every clone gates against the same last-grant timestamp.
#[derive(Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    /// `None` until the first grant, so the first caller never waits
    last_grant: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create an independent limiter with its own timestamp
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_grant: Arc::new(Mutex::new(None)),
        }
    }

    /// Handle to the process-wide limiter (2000ms spacing)
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Configured spacing between grants
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Whether this handle shares state with `other`
    pub fn shares_state_with(&self, other: &RateLimiter) -> bool {
        Arc::ptr_eq(&self.last_grant, &other.last_grant)
    }

    /// Wait until passage is granted and return the grant time.
    ///
    /// The lock is held across the sleep. Dropping the future mid-wait
    /// releases the lock without recording a grant.
    pub async fn wait(&self) -> Instant {
        let mut last_grant = self.last_grant.lock().await;

        if let Some(previous) = *last_grant {
            let ready_at = previous + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                debug!("Rate limiter sleeping {:?}", ready_at - now);
                sleep_until(ready_at).await;
            }
        }

        let granted = Instant::now();
        *last_grant = Some(granted);
        granted
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::global()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("min_interval", &self.min_interval)
            .finish_non_exhaustive()
    }
}
