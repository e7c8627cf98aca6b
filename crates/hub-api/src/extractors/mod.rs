//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation and multipart uploads.

mod auth;
mod path;
mod upload;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::{ResourceIdPath, UserIdPath};
pub use upload::UploadForm;
pub use validated::{QueryParams, ValidatedJson};
