//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users table (without the password hash)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub email_verified: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User row with the number of resources they own
#[derive(Debug, Clone, FromRow)]
pub struct UserSummaryModel {
    #[sqlx(flatten)]
    pub user: UserModel,
    pub resource_count: i64,
}
