//! Version model -> entity mapper

use hub_core::assets::AssetRef;
use hub_core::entities::ResourceVersion;
use hub_core::value_objects::Snowflake;
use sqlx::types::Json;

use crate::models::VersionModel;

impl From<VersionModel> for ResourceVersion {
    fn from(model: VersionModel) -> Self {
        ResourceVersion {
            id: Snowflake::new(model.id),
            resource_id: Snowflake::new(model.resource_id),
            version: model.version,
            changelog: model.changelog,
            zip_url: AssetRef::from_stored(model.zip_url),
            image_urls: model.image_urls.0.into_iter().map(AssetRef::from_stored).collect(),
            file_size: model.file_size,
            created_at: model.created_at,
        }
    }
}

/// JSONB value bound for `resource_versions.image_urls`
pub fn encode_image_urls(urls: &[AssetRef]) -> Json<Vec<String>> {
    Json(urls.iter().map(|u| u.as_str().to_string()).collect())
}
