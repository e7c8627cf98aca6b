//! Redis-backed rate limiter shared by every server instance

use std::time::Duration;

use async_trait::async_trait;
use hub_core::error::DomainError;
use hub_core::traits::{RateDecision, RateLimiter, RepoResult};
use tracing::instrument;

use super::RateLimitPolicy;
use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for rate-limit counters
const KEY_PREFIX: &str = "ratelimit:";

/// Fixed-window counters in Redis (`INCR`, with `EXPIRE` set on the first hit)
#[derive(Debug, Clone)]
pub struct RedisRateLimiter {
    pool: RedisPool,
    policy: RateLimitPolicy,
}

impl RedisRateLimiter {
    pub fn new(pool: RedisPool, policy: RateLimitPolicy) -> Self {
        Self { pool, policy }
    }

    fn key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    fn window_secs(&self) -> i64 {
        i64::try_from(self.policy.window.as_secs().max(1)).unwrap_or(i64::MAX)
    }
}

fn cache_error(e: RedisPoolError) -> DomainError {
    DomainError::CacheError(e.to_string())
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    #[instrument(skip(self))]
    async fn check(&self, key: &str) -> RepoResult<RateDecision> {
        let key = Self::key(key);
        let mut conn = self.pool.get().await.map_err(cache_error)?;

        let attempts: u32 = redis::cmd("INCR")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| cache_error(e.into()))?;

        if attempts == 1 {
            redis::cmd("EXPIRE")
                .arg(&key)
                .arg(self.window_secs())
                .query_async::<()>(&mut conn)
                .await
                .map_err(|e| cache_error(e.into()))?;
        }

        if attempts <= self.policy.max_attempts {
            return Ok(RateDecision::Allowed);
        }

        let ttl: i64 = redis::cmd("TTL")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| cache_error(e.into()))?;

        // -1: counter lost its expiry; re-arm it so the key cannot lock forever
        if ttl < 0 {
            redis::cmd("EXPIRE")
                .arg(&key)
                .arg(self.window_secs())
                .query_async::<()>(&mut conn)
                .await
                .map_err(|e| cache_error(e.into()))?;
        }

        let retry_after = u64::try_from(ttl)
            .map(Duration::from_secs)
            .unwrap_or(self.policy.window);
        Ok(RateDecision::Denied { retry_after })
    }
}
