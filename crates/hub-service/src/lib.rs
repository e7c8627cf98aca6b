//! # hub-service
//!
//! Application layer: the resource lifecycle, version retention, moderation
//! and account use cases, plus the DTOs the HTTP layer serialises.

pub mod dto;
pub mod services;

pub use services::{
    AdminService, AuthService, CleanupWarning, LogMailer, ModerationService, ResourceService,
    RetentionReport, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    ServiceSettings, VersionService,
};
