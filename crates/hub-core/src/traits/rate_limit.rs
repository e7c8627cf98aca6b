use std::time::Duration;

use async_trait::async_trait;

use super::repositories::RepoResult;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Denied { retry_after: Duration },
}

impl RateDecision {
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Keyed attempt counter (fixed window)
///
/// Every call to `check` counts as one attempt for `key`.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn check(&self, key: &str) -> RepoResult<RateDecision>;
}
