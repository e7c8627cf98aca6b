//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// The signed-in user's own record
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub email_verified: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

/// Bearer token plus the user it was issued for
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: CurrentUserResponse,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<CurrentUserResponse>,
}

impl SessionResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    pub fn signed_in(user: CurrentUserResponse) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }
}

// ============================================================================
// Resource Responses
// ============================================================================

/// Resource fields shared by every resource payload
#[derive(Debug, Clone, Serialize)]
pub struct ResourceResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub plugin_type: String,
    pub category: Option<String>,
    pub content: String,
    pub current_version: String,
    pub is_visible: bool,
    pub is_approved: bool,
    pub download_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionResponse {
    pub id: String,
    pub resource_id: String,
    pub version: String,
    pub changelog: String,
    pub zip_url: String,
    pub image_urls: Vec<String>,
    pub file_size: String,
    pub created_at: DateTime<Utc>,
}

/// Single resource with its full history and the viewer's capabilities
#[derive(Debug, Serialize)]
pub struct ResourceDetailResponse {
    #[serde(flatten)]
    pub resource: ResourceResponse,
    pub author: String,
    pub versions: Vec<VersionResponse>,
    pub can_edit: bool,
    pub can_delete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
}

/// Public listing row
#[derive(Debug, Serialize)]
pub struct ResourceListItemResponse {
    #[serde(flatten)]
    pub resource: ResourceResponse,
    pub author: AuthorResponse,
    pub latest_version: Option<VersionResponse>,
    pub version_count: i64,
}

/// Owner fields admins need for moderation decisions
#[derive(Debug, Clone, Serialize)]
pub struct ResourceOwnerResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    pub is_banned: bool,
}

/// Admin listing row
#[derive(Debug, Serialize)]
pub struct AdminResourceListItemResponse {
    #[serde(flatten)]
    pub resource: ResourceResponse,
    pub owner: ResourceOwnerResponse,
    pub latest_version: Option<VersionResponse>,
    pub version_count: i64,
}

#[derive(Debug, Serialize)]
pub struct VersionCreatedResponse {
    pub version: VersionResponse,
    pub message: String,
}

/// Result of the download counter; always returned with HTTP 200
#[derive(Debug, Clone, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub message: String,
}

impl DownloadResponse {
    pub fn tracked() -> Self {
        Self {
            success: true,
            message: "Download tracked successfully".to_string(),
        }
    }

    pub fn untracked() -> Self {
        Self {
            success: false,
            message: "Failed to track download".to_string(),
        }
    }
}

// ============================================================================
// Toggle Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalToggleResponse {
    pub is_approved: bool,
    pub message: String,
}

impl ApprovalToggleResponse {
    pub fn new(is_approved: bool) -> Self {
        let message = if is_approved {
            "Resource approved"
        } else {
            "Resource unapproved"
        };
        Self {
            is_approved,
            message: message.to_string(),
        }
    }
}

/// Visibility after an owner or admin toggle
#[derive(Debug, Clone, Serialize)]
pub struct VisibilityToggleResponse {
    pub is_visible: bool,
    pub message: String,
}

impl VisibilityToggleResponse {
    /// Owner toggle wording
    pub fn by_owner(is_visible: bool) -> Self {
        let state = if is_visible { "visible" } else { "hidden" };
        Self {
            is_visible,
            message: format!("Resource is now {state}"),
        }
    }

    /// Admin hide/show wording
    pub fn by_admin(is_visible: bool) -> Self {
        let message = if is_visible {
            "Resource shown"
        } else {
            "Resource hidden"
        };
        Self {
            is_visible,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BanToggleResponse {
    pub is_banned: bool,
    pub message: String,
}

impl BanToggleResponse {
    pub fn new(is_banned: bool) -> Self {
        let message = if is_banned { "User banned" } else { "User unbanned" };
        Self {
            is_banned,
            message: message.to_string(),
        }
    }
}

// ============================================================================
// Admin User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub email_verified: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
    pub resource_count: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    /// `disabled` when the upload limiter runs in-process
    pub redis: String,
}

impl ReadinessResponse {
    /// `redis_healthy` is `None` when Redis is not configured
    pub fn ready(database_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = database_healthy && redis_healthy.unwrap_or(true);
        let label = |healthy: bool| if healthy { "healthy" } else { "unhealthy" };
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database_healthy).to_string(),
                redis: redis_healthy.map_or("disabled", label).to_string(),
            },
        }
    }
}
