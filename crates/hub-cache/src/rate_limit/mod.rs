//! Fixed-window rate limiters
//!
//! Both backends count every `check` as one attempt. The first attempt for a
//! key opens a window of `policy.window`; once `policy.max_attempts` have
//! been counted in that window further attempts are denied until it closes.

mod memory;
mod redis;

pub use memory::InMemoryRateLimiter;
pub use redis::RedisRateLimiter;

use std::time::Duration;

/// Attempts allowed per window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_attempts: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn per_window(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
        }
    }

    /// Upload throttling settings from the application config
    pub fn uploads(config: &hub_common::RateLimitConfig) -> Self {
        Self::per_window(
            config.upload_attempts,
            Duration::from_secs(config.upload_window_secs),
        )
    }
}

impl Default for RateLimitPolicy {
    /// 5 attempts per 5 minutes
    fn default() -> Self {
        Self::per_window(5, Duration::from_secs(300))
    }
}
