use async_trait::async_trait;

use super::repositories::RepoResult;

/// Outbound mail
///
/// Callers treat delivery failures as non-fatal: they are logged and the
/// surrounding account operation still succeeds.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the address-verification link to a freshly registered user
    async fn send_verification(&self, to: &str, verification_url: &str) -> RepoResult<()>;
}
