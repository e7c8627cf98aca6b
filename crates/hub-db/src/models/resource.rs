//! Resource database models

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the resources table
#[derive(Debug, Clone, FromRow)]
pub struct ResourceModel {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub plugin_type: String,
    pub category: Option<String>,
    pub content: String,
    pub current_version: String,
    pub is_visible: bool,
    pub is_approved: bool,
    pub download_count: i64,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row: resource, author columns, version count and the newest
/// version (all `latest_*` columns are NULL when the resource has none)
#[derive(Debug, Clone, FromRow)]
pub struct ResourceListingModel {
    #[sqlx(flatten)]
    pub resource: ResourceModel,
    pub author_username: String,
    pub author_email: String,
    pub author_email_verified: bool,
    pub author_is_banned: bool,
    pub version_count: i64,
    pub latest_id: Option<i64>,
    pub latest_version: Option<String>,
    pub latest_changelog: Option<String>,
    pub latest_zip_url: Option<String>,
    pub latest_image_urls: Option<Json<Vec<String>>>,
    pub latest_file_size: Option<String>,
    pub latest_created_at: Option<DateTime<Utc>>,
}
