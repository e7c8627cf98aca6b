//! Resource model -> entity mappers

use hub_core::assets::AssetRef;
use hub_core::entities::{Resource, ResourceAuthor, ResourceListing, ResourceVersion};
use hub_core::value_objects::Snowflake;

use crate::models::{ResourceListingModel, ResourceModel};

impl From<ResourceModel> for Resource {
    fn from(model: ResourceModel) -> Self {
        Resource {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            title: model.title,
            description: model.description,
            plugin_type: model.plugin_type,
            category: model.category,
            content: model.content,
            current_version: model.current_version,
            is_visible: model.is_visible,
            is_approved: model.is_approved,
            download_count: model.download_count,
            deleted_at: model.deleted_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ResourceListingModel> for ResourceListing {
    fn from(model: ResourceListingModel) -> Self {
        let resource_id = model.resource.id;
        let author = ResourceAuthor {
            id: Snowflake::new(model.resource.owner_id),
            username: model.author_username,
            email: model.author_email,
            email_verified: model.author_email_verified,
            is_banned: model.author_is_banned,
        };

        // LEFT JOIN LATERAL yields all-NULL latest_* columns when there is no version
        let latest_version = match (
            model.latest_id,
            model.latest_version,
            model.latest_zip_url,
            model.latest_created_at,
        ) {
            (Some(id), Some(version), Some(zip_url), Some(created_at)) => Some(ResourceVersion {
                id: Snowflake::new(id),
                resource_id: Snowflake::new(resource_id),
                version,
                changelog: model.latest_changelog.unwrap_or_default(),
                zip_url: AssetRef::from_stored(zip_url),
                image_urls: model
                    .latest_image_urls
                    .map(|urls| urls.0.into_iter().map(AssetRef::from_stored).collect())
                    .unwrap_or_default(),
                file_size: model.latest_file_size.unwrap_or_default(),
                created_at,
            }),
            _ => None,
        };

        ResourceListing {
            resource: model.resource.into(),
            author,
            version_count: model.version_count,
            latest_version,
        }
    }
}
