//! Moderation and user administration handlers
//!
//! Every endpoint here requires an admin; the services enforce it.

use axum::extract::{Path, State};
use axum::Json;
use hub_service::dto::{
    AdminResourceListItemResponse, AdminResourceListQuery, ApprovalToggleResponse,
    BanToggleResponse, MessageResponse, UserSummaryResponse, VisibilityToggleResponse,
};
use hub_service::{AdminService, ModerationService};

use crate::extractors::{AuthUser, QueryParams, ResourceIdPath, UserIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /admin/resources
pub async fn list_resources(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<AdminResourceListQuery>,
) -> ApiResult<Json<Vec<AdminResourceListItemResponse>>> {
    let service = ModerationService::new(state.service_context());
    let resources = service.list_resources(auth.user_id, query).await?;
    Ok(Json(resources))
}

/// PATCH /admin/resources/:id/approve
pub async fn toggle_approval(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ResourceIdPath>,
) -> ApiResult<Json<ApprovalToggleResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.toggle_approval(path.id()?, auth.user_id).await?;
    Ok(Json(response))
}

/// PATCH /admin/resources/:id/hide
pub async fn toggle_hidden(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ResourceIdPath>,
) -> ApiResult<Json<VisibilityToggleResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.toggle_hidden(path.id()?, auth.user_id).await?;
    Ok(Json(response))
}

/// DELETE /admin/resources/:id
pub async fn delete_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ResourceIdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.delete(path.id()?, auth.user_id).await?;
    Ok(Json(response))
}

/// Users with their resource counts, newest first
///
/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserSummaryResponse>>> {
    let service = AdminService::new(state.service_context());
    let users = service.list_users(auth.user_id).await?;
    Ok(Json(users))
}

/// PATCH /admin/users/:id/ban
pub async fn toggle_ban(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<BanToggleResponse>> {
    let service = AdminService::new(state.service_context());
    let response = service.toggle_ban(auth.user_id, path.user_id()?).await?;
    Ok(Json(response))
}
