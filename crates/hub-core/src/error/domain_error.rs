//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::assets::AssetError;
use crate::moderation::ContentError;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Resource not found: {0}")]
    ResourceNotFound(Snowflake),

    #[error("Version not found: {0}")]
    VersionNotFound(Snowflake),

    #[error("Verification token not found")]
    VerificationTokenNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the resource owner")]
    NotResourceOwner,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Please verify your email before uploading resources")]
    EmailNotVerified,

    #[error("Your account has been banned")]
    AccountBanned,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameAlreadyExists,

    #[error("Resource already deleted")]
    ResourceAlreadyDeleted,

    #[error("Cannot ban yourself")]
    SelfBan,

    #[error("Cannot ban admin users")]
    CannotBanAdmin,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Verification token has expired")]
    VerificationTokenExpired,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ResourceNotFound(_) => "UNKNOWN_RESOURCE",
            Self::VersionNotFound(_) => "UNKNOWN_VERSION",
            Self::VerificationTokenNotFound => "UNKNOWN_TOKEN",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Content(_) => "CONTENT_REJECTED",
            Self::Asset(e) if e.is_invalid_upload() => "INVALID_UPLOAD",
            Self::Asset(_) => "ASSET_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Authorization
            Self::NotResourceOwner => "NOT_RESOURCE_OWNER",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::EmailNotVerified => "EMAIL_NOT_VERIFIED",
            Self::AccountBanned => "ACCOUNT_BANNED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::ResourceAlreadyDeleted => "ALREADY_DELETED",
            Self::SelfBan => "SELF_BAN",
            Self::CannotBanAdmin => "CANNOT_BAN_ADMIN",

            // Business Rules
            Self::VerificationTokenExpired => "TOKEN_EXPIRED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ResourceNotFound(_)
                | Self::VersionNotFound(_)
                | Self::VerificationTokenNotFound
        )
    }

    /// Check if this is a validation error
    ///
    /// Asset errors only count when the upload itself was rejected; I/O
    /// failures while writing or deleting files are infrastructure errors.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Asset(e) => e.is_invalid_upload(),
            _ => matches!(
                self,
                Self::ValidationError(_)
                    | Self::Content(_)
                    | Self::InvalidEmail
                    | Self::InvalidUsername(_)
                    | Self::WeakPassword(_)
            ),
        }
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotResourceOwner
                | Self::AdminRequired
                | Self::EmailNotVerified
                | Self::AccountBanned
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::ResourceAlreadyDeleted
                | Self::SelfBan
                | Self::CannotBanAdmin
        )
    }

    /// Check if the referenced thing existed but is no longer usable
    pub fn is_gone(&self) -> bool {
        matches!(self, Self::VerificationTokenExpired)
    }
}
