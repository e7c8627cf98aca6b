//! Ports implemented by the infrastructure crates

mod mailer;
mod rate_limit;
mod repositories;

pub use mailer::Mailer;
pub use rate_limit::{RateDecision, RateLimiter};
pub use repositories::{
    RepoResult, ResourceFilter, ResourceRepository, UserRepository, VerificationTokenRepository,
    VersionRepository,
};
