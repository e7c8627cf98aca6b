//! Domain entities - core business objects

mod resource;
mod user;
mod verification;
mod version;

pub use resource::{Resource, ResourceAuthor, ResourceDraft, ResourceListing, ResourcePatch};
pub use user::{User, UserRole, UserSummary};
pub use verification::VerificationToken;
pub use version::{
    format_file_size, ResourceVersion, DEFAULT_ADD_CHANGELOG, DEFAULT_INITIAL_CHANGELOG,
};
