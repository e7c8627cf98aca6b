//! Moderation service
//!
//! Admin-only operations on resources: the unrestricted listing, approval
//! and visibility toggles, and deletion.

use hub_core::entities::User;
use hub_core::policy::{AccessPolicy, OwnerScope};
use hub_core::traits::ResourceFilter;
use hub_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    AdminResourceListItemResponse, AdminResourceListQuery, ApprovalToggleResponse,
    MessageResponse, VisibilityToggleResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::resource::{find_live_resource, load_actor, mark_deleted};

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Every resource matching the filters, with owner moderation fields
    #[instrument(skip(self, query))]
    pub async fn list_resources(
        &self,
        actor_id: Snowflake,
        query: AdminResourceListQuery,
    ) -> ServiceResult<Vec<AdminResourceListItemResponse>> {
        require_admin(self.ctx, actor_id).await?;

        let mut filter = ResourceFilter::new(OwnerScope::All)
            .with_plugin_type(query.plugin_type)
            .with_category(query.category)
            .with_search(query.search);
        filter.approved = query.approved;
        filter.visible = query.visible;
        filter.include_deleted = query.include_deleted;

        let rows = self.ctx.resource_repo().list(&filter).await?;
        Ok(rows
            .into_iter()
            .map(AdminResourceListItemResponse::from)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn toggle_approval(
        &self,
        resource_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<ApprovalToggleResponse> {
        let admin = require_admin(self.ctx, actor_id).await?;
        let mut resource = find_live_resource(self.ctx, resource_id).await?;

        let is_approved = resource.toggle_approval();
        self.ctx.resource_repo().update(&resource).await?;

        info!(resource_id = %resource.id, admin_id = %admin.id, is_approved, "Approval toggled");
        Ok(ApprovalToggleResponse::new(is_approved))
    }

    /// Admin show/hide; independent of approval
    #[instrument(skip(self))]
    pub async fn toggle_hidden(
        &self,
        resource_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<VisibilityToggleResponse> {
        let admin = require_admin(self.ctx, actor_id).await?;
        let mut resource = find_live_resource(self.ctx, resource_id).await?;

        let is_visible = resource.toggle_visibility();
        self.ctx.resource_repo().update(&resource).await?;

        info!(resource_id = %resource.id, admin_id = %admin.id, is_visible, "Admin toggled visibility");
        Ok(VisibilityToggleResponse::by_admin(is_visible))
    }

    /// Soft delete on behalf of an admin
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        resource_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        let admin = require_admin(self.ctx, actor_id).await?;
        let resource = self
            .ctx
            .resource_repo()
            .find_by_id(resource_id)
            .await?
            .ok_or(DomainError::ResourceNotFound(resource_id))?;

        if resource.is_deleted() {
            return Err(DomainError::ResourceAlreadyDeleted.into());
        }

        mark_deleted(self.ctx, resource, &admin).await
    }
}

/// Load the actor and insist on the admin role
pub(crate) async fn require_admin(ctx: &ServiceContext, actor_id: Snowflake) -> ServiceResult<User> {
    let actor = load_actor(ctx, actor_id).await?;
    if AccessPolicy::can_moderate(Some(&actor.viewer())) {
        Ok(actor)
    } else {
        Err(DomainError::AdminRequired.into())
    }
}
