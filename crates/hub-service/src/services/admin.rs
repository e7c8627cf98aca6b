//! Admin service - account management

use hub_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{BanToggleResponse, UserSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::moderation::require_admin;

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All users, newest first, with their resource counts
    #[instrument(skip(self))]
    pub async fn list_users(&self, actor_id: Snowflake) -> ServiceResult<Vec<UserSummaryResponse>> {
        require_admin(self.ctx, actor_id).await?;

        let users = self.ctx.user_repo().list_with_resource_counts().await?;
        Ok(users.into_iter().map(UserSummaryResponse::from).collect())
    }

    /// Flip a user's ban flag
    ///
    /// Admins cannot ban themselves or other admins.
    #[instrument(skip(self))]
    pub async fn toggle_ban(
        &self,
        actor_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<BanToggleResponse> {
        let admin = require_admin(self.ctx, actor_id).await?;
        if admin.id == target_id {
            return Err(DomainError::SelfBan.into());
        }

        let target = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::UserNotFound(target_id))?;
        if target.is_admin() {
            return Err(DomainError::CannotBanAdmin.into());
        }

        let is_banned = !target.is_banned;
        self.ctx.user_repo().set_banned(target.id, is_banned).await?;

        info!(admin_id = %admin.id, user_id = %target.id, is_banned, "Ban toggled");
        Ok(BanToggleResponse::new(is_banned))
    }
}
