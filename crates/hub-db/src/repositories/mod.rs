//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in hub-core.

mod error;
mod resource;
mod user;
mod verification;
mod version;

pub use resource::PgResourceRepository;
pub use user::PgUserRepository;
pub use verification::PgVerificationTokenRepository;
pub use version::PgVersionRepository;
