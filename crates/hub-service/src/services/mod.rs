//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and exposes one group
//! of use cases. Services load the acting user from the repository on every
//! call; the bearer token only identifies who is asking.

pub mod admin;
pub mod auth;
pub mod context;
pub mod error;
pub mod mailer;
pub mod moderation;
pub mod resource;
mod upload;
pub mod version;

pub use admin::AdminService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use mailer::LogMailer;
pub use moderation::ModerationService;
pub use resource::ResourceService;
pub use upload::CleanupWarning;
pub use version::{RetentionReport, VersionService};
