//! User model -> entity mapper

use hub_core::entities::{User, UserRole, UserSummary};
use hub_core::value_objects::Snowflake;
use tracing::warn;

use crate::models::{UserModel, UserSummaryModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        let role = UserRole::parse(&model.role).unwrap_or_else(|| {
            warn!(user_id = model.id, role = %model.role, "Unknown role in database, treating as USER");
            UserRole::User
        });

        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            role,
            email_verified: model.email_verified,
            is_banned: model.is_banned,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<UserSummaryModel> for UserSummary {
    fn from(model: UserSummaryModel) -> Self {
        UserSummary {
            user: model.user.into(),
            resource_count: model.resource_count,
        }
    }
}
