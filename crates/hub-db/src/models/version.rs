//! Resource version database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the resource_versions table
#[derive(Debug, Clone, FromRow)]
pub struct VersionModel {
    pub id: i64,
    pub resource_id: i64,
    pub version: String,
    pub changelog: String,
    pub zip_url: String,
    /// JSONB array of image locators, in upload order
    pub image_urls: Json<Vec<String>>,
    pub file_size: String,
    pub created_at: DateTime<Utc>,
}
