//! # hub-core
//!
//! Domain layer for the resource hub: entities, value objects, the content
//! filter, the access policy evaluator, and the ports (repositories, asset
//! store, rate limiter, mailer) implemented by the infrastructure crates.
//! This crate has no dependency on a database, cache, or web framework.

pub mod assets;
pub mod entities;
pub mod error;
pub mod moderation;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use assets::{AssetError, AssetKind, AssetLimits, AssetRef, AssetStore, AssetUpload};
pub use entities::{
    format_file_size, Resource, ResourceAuthor, ResourceDraft, ResourceListing, ResourcePatch,
    ResourceVersion, User, UserRole, UserSummary, VerificationToken, DEFAULT_ADD_CHANGELOG,
    DEFAULT_INITIAL_CHANGELOG,
};
pub use error::DomainError;
pub use moderation::{ContentError, TextField};
pub use policy::{AccessPolicy, OwnerScope, Viewer};
pub use traits::{
    Mailer, RateDecision, RateLimiter, RepoResult, ResourceFilter, ResourceRepository,
    UserRepository, VerificationTokenRepository, VersionRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
