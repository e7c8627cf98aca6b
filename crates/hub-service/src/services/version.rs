//! Version service
//!
//! Adds versions to a resource and keeps each history bounded. After a
//! version is recorded the resource's `current_version` is pointed at it
//! and everything beyond the newest `retention_keep` versions is pruned,
//! assets first, then the record.

use hub_core::entities::{Resource, ResourceVersion, User, DEFAULT_ADD_CHANGELOG};
use hub_core::policy::AccessPolicy;
use hub_core::Snowflake;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AddVersionRequest, UploadedFiles, VersionCreatedResponse, VersionResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::resource::{find_live_resource, load_actor, load_optional_viewer};
use super::upload::{self, CleanupWarning};

/// What a retention pass removed and what it could not
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionReport {
    pub pruned: Vec<Snowflake>,
    pub warnings: Vec<CleanupWarning>,
}

impl RetentionReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Version service
pub struct VersionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VersionService<'a> {
    /// Create a new VersionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Upload a new version of an existing resource (owner or admin)
    #[instrument(skip(self, request, files))]
    pub async fn add_version(
        &self,
        resource_id: Snowflake,
        actor_id: Snowflake,
        request: AddVersionRequest,
        files: UploadedFiles,
    ) -> ServiceResult<VersionCreatedResponse> {
        let actor = load_actor(self.ctx, actor_id).await?;
        let resource = find_live_resource(self.ctx, resource_id).await?;

        if !AccessPolicy::can_edit(&resource, Some(&actor.viewer())) {
            return Err(ServiceError::permission_denied(
                "You do not have permission to add versions to this resource",
            ));
        }

        upload::throttle(self.ctx, &actor).await?;

        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        let label = request
            .version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());
        let (Some(label), Some(archive)) = (label, files.archive.as_ref()) else {
            return Err(ServiceError::validation(
                "Version number and ZIP file are required",
            ));
        };

        upload::check_uploads(self.ctx, archive, &files.images)?;
        let stored = upload::store_assets(self.ctx, archive, &files.images).await?;

        let changelog = request
            .changelog
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_ADD_CHANGELOG.to_string());

        let version = ResourceVersion::new(
            self.ctx.generate_id(),
            resource.id,
            label.to_string(),
            changelog,
            stored.archive.clone(),
            stored.images.clone(),
            stored.archive_bytes,
        );

        if let Err(e) = self.ctx.version_repo().create(&version).await {
            upload::discard_assets(self.ctx, stored.iter()).await;
            return Err(e.into());
        }

        let report = self.record_new_version(&resource, &version).await?;
        info!(
            resource_id = %resource.id,
            version_id = %version.id,
            actor_id = %actor.id,
            pruned = report.pruned.len(),
            "Version added"
        );

        Ok(VersionCreatedResponse {
            version: VersionResponse::from(&version),
            message: "New version created successfully".to_string(),
        })
    }

    /// Point the resource at a just-inserted version, then prune its history
    #[instrument(skip(self, resource, version), fields(resource_id = %resource.id))]
    pub async fn record_new_version(
        &self,
        resource: &Resource,
        version: &ResourceVersion,
    ) -> ServiceResult<RetentionReport> {
        self.ctx
            .resource_repo()
            .set_current_version(resource.id, &version.version)
            .await?;

        self.enforce_retention(resource.id, self.ctx.settings().retention_keep)
            .await
    }

    /// Delete every version beyond the newest `keep`
    ///
    /// Assets are removed before their record, so a failure can leave a
    /// record without files but never files without a record. Failures are
    /// collected as warnings and do not stop the pass.
    #[instrument(skip(self))]
    pub async fn enforce_retention(
        &self,
        resource_id: Snowflake,
        keep: usize,
    ) -> ServiceResult<RetentionReport> {
        let versions = self.ctx.version_repo().list_by_resource(resource_id).await?;
        let mut report = RetentionReport::default();

        for surplus in versions.iter().skip(keep) {
            let asset_warnings = upload::discard_assets(self.ctx, surplus.assets()).await;
            report.warnings.extend(asset_warnings);

            match self.ctx.version_repo().delete(surplus.id).await {
                Ok(()) => report.pruned.push(surplus.id),
                Err(e) => {
                    warn!(version_id = %surplus.id, error = %e, "Failed to delete pruned version");
                    report.warnings.push(CleanupWarning::Record {
                        version_id: surplus.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        if !report.pruned.is_empty() {
            info!(
                resource_id = %resource_id,
                pruned = report.pruned.len(),
                warnings = report.warnings.len(),
                "Old versions pruned"
            );
        }

        Ok(report)
    }

    /// Version history, newest first
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        resource_id: Snowflake,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<Vec<VersionResponse>> {
        let resource = find_live_resource(self.ctx, resource_id).await?;
        let viewer = load_optional_viewer(self.ctx, viewer_id).await?;
        ensure_can_view(&resource, viewer.as_ref())?;

        let versions = self.ctx.version_repo().list_by_resource(resource.id).await?;
        Ok(versions.iter().map(VersionResponse::from).collect())
    }
}

pub(crate) fn ensure_can_view(resource: &Resource, viewer: Option<&User>) -> ServiceResult<()> {
    let viewer = viewer.map(User::viewer);
    if AccessPolicy::can_view(resource, viewer.as_ref()) {
        Ok(())
    } else {
        Err(ServiceError::permission_denied(
            "You do not have permission to view this resource",
        ))
    }
}
