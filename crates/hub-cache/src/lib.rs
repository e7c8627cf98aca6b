//! # hub-cache
//!
//! Backends for the upload [`RateLimiter`](hub_core::RateLimiter) port.
//!
//! - **In-memory**: per-process fixed-window counters in a `DashMap`
//! - **Redis**: counters shared by every server instance, using `INCR` + `EXPIRE`
//!
//! ## Example
//!
//! ```ignore
//! use hub_cache::{InMemoryRateLimiter, RateLimitPolicy};
//! use hub_core::RateLimiter;
//!
//! let limiter = InMemoryRateLimiter::new(RateLimitPolicy::per_window(5, Duration::from_secs(300)));
//! let decision = limiter.check("upload:42").await?;
//! ```

pub mod pool;
pub mod rate_limit;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export limiter types
pub use rate_limit::{InMemoryRateLimiter, RateLimitPolicy, RedisRateLimiter};
