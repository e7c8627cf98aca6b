//! Resource service
//!
//! The resource lifecycle: creation with its first version, detail and
//! listing under the access policy, owner edits, owner visibility, soft
//! deletion and the download counter.

use hub_common::AppError;
use hub_core::entities::{
    Resource, ResourceDraft, ResourcePatch, ResourceVersion, User, DEFAULT_INITIAL_CHANGELOG,
};
use hub_core::moderation::{find_near_duplicate, validate_description, validate_title, ContentError};
use hub_core::policy::{AccessPolicy, OwnerScope};
use hub_core::traits::ResourceFilter;
use hub_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    CreateResourceRequest, DownloadResponse, MessageResponse, ResourceDetailResponse,
    ResourceListItemResponse, ResourceListQuery, ResourceResponse, UpdateResourceRequest,
    UploadedFiles, VersionResponse, VisibilityToggleResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::upload;
use super::version::ensure_can_view;

/// Resource service
pub struct ResourceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ResourceService<'a> {
    /// Create a new ResourceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a resource and its first version
    ///
    /// The uploader must be verified and not banned. Text and files are
    /// validated before anything is written; if a write fails, assets
    /// already stored for this request are removed again.
    #[instrument(skip(self, request, files))]
    pub async fn create(
        &self,
        actor_id: Snowflake,
        request: CreateResourceRequest,
        files: UploadedFiles,
    ) -> ServiceResult<ResourceDetailResponse> {
        let actor = self
            .ctx
            .user_repo()
            .find_by_id(actor_id)
            .await?
            .ok_or(DomainError::UserNotFound(actor_id))?;
        if !actor.email_verified {
            return Err(DomainError::EmailNotVerified.into());
        }
        if actor.is_banned {
            return Err(DomainError::AccountBanned.into());
        }

        upload::throttle(self.ctx, &actor).await?;

        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let CreateResourceRequest {
            title,
            description,
            plugin_type,
            category,
            content,
            version,
            changelog,
        } = request;
        let (Some(title), Some(description), Some(plugin_type), Some(content), Some(label), Some(archive)) = (
            filled(title),
            filled(description),
            filled(plugin_type),
            filled(content),
            filled(version),
            files.archive.as_ref(),
        ) else {
            return Err(ServiceError::validation(
                "Missing required fields: title, description, plugin_type, content, version and archive are required",
            ));
        };

        validate_title(&title).map_err(DomainError::from)?;
        validate_description(&description).map_err(DomainError::from)?;

        let existing = self.ctx.resource_repo().titles_by_owner(actor.id).await?;
        if let Some(similar) = find_near_duplicate(&title, existing.iter().map(String::as_str)) {
            return Err(DomainError::from(ContentError::DuplicateTitle(similar.to_string())).into());
        }

        upload::check_uploads(self.ctx, archive, &files.images)?;
        let stored = upload::store_assets(self.ctx, archive, &files.images).await?;

        let resource = Resource::new(
            self.ctx.generate_id(),
            actor.id,
            ResourceDraft {
                title,
                description,
                plugin_type,
                category,
                content,
            },
            label.clone(),
        );
        let version = ResourceVersion::new(
            self.ctx.generate_id(),
            resource.id,
            label,
            filled(changelog).unwrap_or_else(|| DEFAULT_INITIAL_CHANGELOG.to_string()),
            stored.archive.clone(),
            stored.images.clone(),
            stored.archive_bytes,
        );

        if let Err(e) = self
            .ctx
            .resource_repo()
            .create_with_initial_version(&resource, &version)
            .await
        {
            let warnings = upload::discard_assets(self.ctx, stored.iter()).await;
            warn!(
                error = %e,
                orphaned = warnings.len(),
                "Resource creation failed after assets were stored"
            );
            return Err(e.into());
        }

        info!(resource_id = %resource.id, owner_id = %actor.id, "Resource created");

        Ok(ResourceDetailResponse {
            resource: ResourceResponse::from(&resource),
            author: actor.username.clone(),
            versions: vec![VersionResponse::from(&version)],
            can_edit: true,
            can_delete: true,
        })
    }

    /// Resource detail with full history and the viewer's capabilities
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        resource_id: Snowflake,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<ResourceDetailResponse> {
        let resource = find_live_resource(self.ctx, resource_id).await?;
        let viewer = load_optional_viewer(self.ctx, viewer_id).await?;
        ensure_can_view(&resource, viewer.as_ref())?;

        self.detail(&resource, viewer.as_ref()).await
    }

    /// Listing scoped to what the viewer may see
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        viewer_id: Option<Snowflake>,
        query: ResourceListQuery,
    ) -> ServiceResult<Vec<ResourceListItemResponse>> {
        let viewer = load_optional_viewer(self.ctx, viewer_id)
            .await?
            .map(|u| u.viewer());

        let filter = ResourceFilter::new(OwnerScope::for_viewer(viewer.as_ref()))
            .with_plugin_type(query.plugin_type)
            .with_category(query.category)
            .with_search(query.search);

        let rows = self.ctx.resource_repo().list(&filter).await?;
        Ok(rows.into_iter().map(ResourceListItemResponse::from).collect())
    }

    /// Partial update by the owner or an admin
    #[instrument(skip(self, request))]
    pub async fn edit(
        &self,
        resource_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateResourceRequest,
    ) -> ServiceResult<ResourceDetailResponse> {
        let actor = load_actor(self.ctx, actor_id).await?;
        let mut resource = find_live_resource(self.ctx, resource_id).await?;

        if !AccessPolicy::can_edit(&resource, Some(&actor.viewer())) {
            return Err(ServiceError::permission_denied(
                "You do not have permission to edit this resource",
            ));
        }

        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let title = request.title.map(|t| t.trim().to_string());
        if let Some(title) = &title {
            validate_title(title).map_err(DomainError::from)?;
        }
        let description = request.description.map(|d| d.trim().to_string());
        if let Some(description) = &description {
            validate_description(description).map_err(DomainError::from)?;
        }

        resource.apply_patch(ResourcePatch {
            title,
            description,
            plugin_type: filled(request.plugin_type),
            category: request.category,
            content: request.content.filter(|c| !c.trim().is_empty()),
        });
        self.ctx.resource_repo().update(&resource).await?;

        info!(resource_id = %resource.id, actor_id = %actor.id, "Resource updated");
        self.detail(&resource, Some(&actor)).await
    }

    /// Soft delete by the owner or an admin
    #[instrument(skip(self))]
    pub async fn soft_delete(
        &self,
        resource_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        let actor = load_actor(self.ctx, actor_id).await?;
        let resource = self
            .ctx
            .resource_repo()
            .find_by_id(resource_id)
            .await?
            .ok_or(DomainError::ResourceNotFound(resource_id))?;

        if resource.is_deleted() {
            return Err(DomainError::ResourceAlreadyDeleted.into());
        }
        if !AccessPolicy::can_delete(&resource, Some(&actor.viewer())) {
            return Err(ServiceError::permission_denied(
                "You do not have permission to delete this resource",
            ));
        }

        mark_deleted(self.ctx, resource, &actor).await
    }

    /// Owner-only visibility toggle
    #[instrument(skip(self))]
    pub async fn toggle_visibility(
        &self,
        resource_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<VisibilityToggleResponse> {
        let actor = load_actor(self.ctx, actor_id).await?;
        let mut resource = find_live_resource(self.ctx, resource_id).await?;

        if !AccessPolicy::can_toggle_visibility(&resource, Some(&actor.viewer())) {
            return Err(ServiceError::permission_denied(
                "Only the resource owner can toggle visibility",
            ));
        }

        let is_visible = resource.toggle_visibility();
        self.ctx.resource_repo().update(&resource).await?;

        info!(resource_id = %resource.id, is_visible, "Owner toggled visibility");
        Ok(VisibilityToggleResponse::by_owner(is_visible))
    }

    /// Count a download; never fails
    #[instrument(skip(self))]
    pub async fn track_download(&self, resource_id: Snowflake) -> DownloadResponse {
        match self
            .ctx
            .resource_repo()
            .increment_download_count(resource_id)
            .await
        {
            Ok(()) => DownloadResponse::tracked(),
            Err(e) => {
                warn!(resource_id = %resource_id, error = %e, "Failed to track download");
                DownloadResponse::untracked()
            }
        }
    }

    async fn detail(
        &self,
        resource: &Resource,
        viewer: Option<&User>,
    ) -> ServiceResult<ResourceDetailResponse> {
        let author = self
            .ctx
            .user_repo()
            .find_by_id(resource.owner_id)
            .await?
            .ok_or_else(|| ServiceError::internal("Resource owner not found"))?;
        let versions = self.ctx.version_repo().list_by_resource(resource.id).await?;

        let viewer = viewer.map(User::viewer);
        Ok(ResourceDetailResponse {
            resource: ResourceResponse::from(resource),
            author: author.username,
            versions: versions.iter().map(VersionResponse::from).collect(),
            can_edit: AccessPolicy::can_edit(resource, viewer.as_ref()),
            can_delete: AccessPolicy::can_delete(resource, viewer.as_ref()),
        })
    }
}

/// Trimmed value, or `None` when absent or blank
fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The authenticated actor, re-read so role and flags are current
pub(crate) async fn load_actor(ctx: &ServiceContext, actor_id: Snowflake) -> ServiceResult<User> {
    ctx.user_repo()
        .find_by_id(actor_id)
        .await?
        .ok_or(ServiceError::App(AppError::InvalidToken))
}

/// Optional viewer; an id that no longer resolves is treated as anonymous
pub(crate) async fn load_optional_viewer(
    ctx: &ServiceContext,
    viewer_id: Option<Snowflake>,
) -> ServiceResult<Option<User>> {
    match viewer_id {
        Some(id) => Ok(ctx.user_repo().find_by_id(id).await?),
        None => Ok(None),
    }
}

/// A resource that exists and is not soft-deleted
pub(crate) async fn find_live_resource(
    ctx: &ServiceContext,
    resource_id: Snowflake,
) -> ServiceResult<Resource> {
    ctx.resource_repo()
        .find_by_id(resource_id)
        .await?
        .filter(|r| !r.is_deleted())
        .ok_or_else(|| DomainError::ResourceNotFound(resource_id).into())
}

/// Set `deleted_at`; versions and assets stay in place
pub(crate) async fn mark_deleted(
    ctx: &ServiceContext,
    mut resource: Resource,
    actor: &User,
) -> ServiceResult<MessageResponse> {
    resource.mark_deleted();
    ctx.resource_repo().update(&resource).await?;

    info!(resource_id = %resource.id, actor_id = %actor.id, "Resource soft-deleted");
    Ok(MessageResponse::new("Resource deleted successfully"))
}
