//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{admin, auth, health, resources, versions};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(resource_routes())
        .merge(admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify-email", post(auth::verify_email))
        .route("/auth/resend-verification", post(auth::resend_verification))
        .route("/auth/session", get(auth::session))
}

/// Resource and version routes
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resources",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route(
            "/resources/:id",
            get(resources::get_resource)
                .put(resources::update_resource)
                .delete(resources::delete_resource),
        )
        .route(
            "/resources/:id/versions",
            get(versions::list_versions).post(versions::add_version),
        )
        .route("/resources/:id/visibility", patch(resources::toggle_visibility))
        .route("/resources/:id/download", post(resources::track_download))
}

/// Moderation and user administration routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/resources", get(admin::list_resources))
        .route("/admin/resources/:id", delete(admin::delete_resource))
        .route("/admin/resources/:id/approve", patch(admin::toggle_approval))
        .route("/admin/resources/:id/hide", patch(admin::toggle_hidden))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id/ban", patch(admin::toggle_ban))
}
