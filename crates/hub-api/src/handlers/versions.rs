//! Version history handlers

use axum::extract::{Path, State};
use axum::Json;
use hub_service::dto::{VersionCreatedResponse, VersionResponse};
use hub_service::VersionService;

use crate::extractors::{AuthUser, OptionalAuthUser, ResourceIdPath, UploadForm};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Version history, newest first
///
/// GET /resources/:id/versions
pub async fn list_versions(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<ResourceIdPath>,
) -> ApiResult<Json<Vec<VersionResponse>>> {
    let service = VersionService::new(state.service_context());
    let versions = service.history(path.id()?, auth.user_id()).await?;
    Ok(Json(versions))
}

/// Upload a new version; older versions beyond the retention count are pruned
///
/// POST /resources/:id/versions (multipart)
pub async fn add_version(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ResourceIdPath>,
    form: UploadForm,
) -> ApiResult<Created<Json<VersionCreatedResponse>>> {
    let (request, files) = form.into_version_request();
    let service = VersionService::new(state.service_context());
    let response = service
        .add_version(path.id()?, auth.user_id, request, files)
        .await?;
    Ok(Created(Json(response)))
}
