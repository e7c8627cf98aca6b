//! Log-only mailer

use async_trait::async_trait;
use hub_core::traits::{Mailer, RepoResult};
use tracing::info;

/// Writes outgoing mail to the log instead of delivering it
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }

    pub fn from_address(&self) -> &str {
        &self.from
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, to: &str, verification_url: &str) -> RepoResult<()> {
        info!(
            from = %self.from,
            to = %to,
            url = %verification_url,
            "Verification email"
        );
        Ok(())
    }
}
