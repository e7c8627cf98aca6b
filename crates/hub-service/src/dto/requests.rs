//! Request DTOs for API endpoints
//!
//! JSON bodies implement `Deserialize` and `Validate`. Multipart uploads are
//! parsed by the HTTP layer into the text-field structs plus [`UploadedFiles`].

use std::sync::LazyLock;

use hub_core::assets::AssetUpload;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{3,20}$").expect("username pattern is valid")
});

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("username").with_message(
            "Username must be 3-20 characters of letters, numbers, hyphens and underscores".into(),
        ))
    }
}

// Distinguishes an absent key (`None`) from an explicit null (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Verification token is required"))]
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResendVerificationRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

// ============================================================================
// Resource Requests
// ============================================================================

/// Text fields of the create-resource form
///
/// Every field is optional at this level so that missing ones produce a
/// single "Missing required fields" error from the service.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateResourceRequest {
    pub title: Option<String>,
    pub description: Option<String>,

    #[validate(length(max = 50, message = "Plugin type must be at most 50 characters"))]
    pub plugin_type: Option<String>,

    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,

    pub content: Option<String>,

    #[validate(length(max = 50, message = "Version must be at most 50 characters"))]
    pub version: Option<String>,

    pub changelog: Option<String>,
}

/// Text fields of the add-version form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddVersionRequest {
    #[validate(length(max = 50, message = "Version must be at most 50 characters"))]
    pub version: Option<String>,

    pub changelog: Option<String>,
}

/// Files of an upload form
#[derive(Debug, Clone, Default)]
pub struct UploadedFiles {
    pub archive: Option<AssetUpload>,
    pub images: Vec<AssetUpload>,
}

/// Partial resource update
///
/// `category` set to `null` or `""` clears it; leaving the key out keeps it.
/// A blank `plugin_type` or `content` counts as not provided.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateResourceRequest {
    pub title: Option<String>,
    pub description: Option<String>,

    #[validate(length(max = 50, message = "Plugin type must be at most 50 characters"))]
    pub plugin_type: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,

    pub content: Option<String>,
}

/// Public listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceListQuery {
    pub plugin_type: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Admin listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminResourceListQuery {
    pub approved: Option<bool>,
    pub visible: Option<bool>,
    #[serde(default)]
    pub include_deleted: bool,
    pub plugin_type: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}
