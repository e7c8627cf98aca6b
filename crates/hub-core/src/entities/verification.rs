//! Email verification token

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use crate::value_objects::Snowflake;

/// Single-use token proving control of an email address
///
/// Issuing a new token for a user supersedes every older one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken {
    /// 32 random bytes, hex-encoded
    pub token: String,
    pub user_id: Snowflake,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Mint a fresh token valid for `ttl`
    pub fn issue(user_id: Snowflake, ttl: Duration) -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let now = Utc::now();
        Self {
            token: hex::encode(bytes),
            user_id,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
