//! Resource handlers
//!
//! Listing, detail, upload, edit, deletion, owner visibility and download
//! tracking.

use axum::extract::{Path, State};
use axum::Json;
use hub_service::dto::{
    DownloadResponse, MessageResponse, ResourceDetailResponse, ResourceListItemResponse,
    ResourceListQuery, UpdateResourceRequest, VisibilityToggleResponse,
};
use hub_service::ResourceService;

use crate::extractors::{
    AuthUser, OptionalAuthUser, QueryParams, ResourceIdPath, UploadForm, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List resources visible to the caller
///
/// GET /resources
pub async fn list_resources(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    QueryParams(query): QueryParams<ResourceListQuery>,
) -> ApiResult<Json<Vec<ResourceListItemResponse>>> {
    let service = ResourceService::new(state.service_context());
    let resources = service.list(auth.user_id(), query).await?;
    Ok(Json(resources))
}

/// Upload a new resource with its first version
///
/// POST /resources (multipart)
pub async fn create_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    form: UploadForm,
) -> ApiResult<Created<Json<ResourceDetailResponse>>> {
    let (request, files) = form.into_create_request();
    let service = ResourceService::new(state.service_context());
    let resource = service.create(auth.user_id, request, files).await?;
    Ok(Created(Json(resource)))
}

/// GET /resources/:id
pub async fn get_resource(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<ResourceIdPath>,
) -> ApiResult<Json<ResourceDetailResponse>> {
    let service = ResourceService::new(state.service_context());
    let resource = service.get(path.id()?, auth.user_id()).await?;
    Ok(Json(resource))
}

/// Partial update (owner or admin)
///
/// PUT /resources/:id
pub async fn update_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ResourceIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateResourceRequest>,
) -> ApiResult<Json<ResourceDetailResponse>> {
    let service = ResourceService::new(state.service_context());
    let resource = service.edit(path.id()?, auth.user_id, request).await?;
    Ok(Json(resource))
}

/// DELETE /resources/:id
pub async fn delete_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ResourceIdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = ResourceService::new(state.service_context());
    let response = service.soft_delete(path.id()?, auth.user_id).await?;
    Ok(Json(response))
}

/// Owner visibility toggle
///
/// PATCH /resources/:id/visibility
pub async fn toggle_visibility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ResourceIdPath>,
) -> ApiResult<Json<VisibilityToggleResponse>> {
    let service = ResourceService::new(state.service_context());
    let response = service.toggle_visibility(path.id()?, auth.user_id).await?;
    Ok(Json(response))
}

/// Count a download; answers 200 even when the counter could not move
///
/// POST /resources/:id/download
pub async fn track_download(
    State(state): State<AppState>,
    Path(path): Path<ResourceIdPath>,
) -> ApiResult<Json<DownloadResponse>> {
    let service = ResourceService::new(state.service_context());
    let response = match path.id() {
        Ok(id) => service.track_download(id).await,
        Err(_) => DownloadResponse::untracked(),
    };
    Ok(Json(response))
}
