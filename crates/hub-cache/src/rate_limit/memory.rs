//! In-process rate limiter

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use hub_core::traits::{RateDecision, RateLimiter, RepoResult};
use tokio::task::JoinHandle;
use tracing::debug;

use super::RateLimitPolicy;

#[derive(Debug, Clone, Copy)]
struct Window {
    opened_at: Instant,
    attempts: u32,
}

/// Fixed-window counters held in this process only
///
/// Counters are not shared between server instances; use
/// [`RedisRateLimiter`](super::RedisRateLimiter) for that.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    policy: RateLimitPolicy,
    windows: DashMap<String, Window>,
}

impl InMemoryRateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            windows: DashMap::new(),
        }
    }

    /// Count one attempt for `key` at `now`
    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            opened_at: now,
            attempts: 0,
        });
        let window = entry.value_mut();

        let elapsed = now.saturating_duration_since(window.opened_at);
        if elapsed >= self.policy.window {
            *window = Window {
                opened_at: now,
                attempts: 0,
            };
        }

        if window.attempts < self.policy.max_attempts {
            window.attempts += 1;
            return RateDecision::Allowed;
        }

        let retry_after = self
            .policy
            .window
            .saturating_sub(now.saturating_duration_since(window.opened_at));
        RateDecision::Denied { retry_after }
    }

    /// Drop windows that have closed as of `now`; returns how many were removed
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        let window = self.policy.window;
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.opened_at) < window);
        before.saturating_sub(self.windows.len())
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }

    /// Periodically purge closed windows so idle keys do not accumulate
    pub fn spawn_purge_task(self: std::sync::Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let removed = self.purge_expired_at(Instant::now());
                if removed > 0 {
                    debug!(removed, "Purged expired rate-limit windows");
                }
            }
        })
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> RepoResult<RateDecision> {
        Ok(self.check_at(key, Instant::now()))
    }
}
