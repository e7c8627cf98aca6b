//! Database models
//!
//! Row structs mirroring the tables in `migrations/`. Ids are raw `i64`;
//! conversion to domain types happens in [`crate::mappers`].

mod resource;
mod user;
mod verification;
mod version;

pub use resource::{ResourceListingModel, ResourceModel};
pub use user::{UserModel, UserSummaryModel};
pub use verification::VerificationTokenModel;
pub use version::VersionModel;
