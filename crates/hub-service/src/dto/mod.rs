//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddVersionRequest, AdminResourceListQuery, CreateResourceRequest, LoginRequest,
    RegisterRequest, ResendVerificationRequest, ResourceListQuery, UpdateResourceRequest,
    UploadedFiles, VerifyEmailRequest,
};

pub use responses::{
    AdminResourceListItemResponse, ApprovalToggleResponse, AuthResponse,
    AuthorResponse, BanToggleResponse, CurrentUserResponse, DownloadResponse, HealthChecks,
    HealthResponse, MessageResponse, ReadinessResponse, RegisterResponse,
    ResourceDetailResponse, ResourceListItemResponse, ResourceOwnerResponse, ResourceResponse,
    SessionResponse, UserSummaryResponse, VersionCreatedResponse, VersionResponse,
    VisibilityToggleResponse,
};
