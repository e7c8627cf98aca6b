//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use hub_core::entities::{
    Resource, ResourceAuthor, ResourceListing, ResourceVersion, User, UserSummary,
};

use super::responses::{
    AdminResourceListItemResponse, AuthorResponse, CurrentUserResponse, ResourceListItemResponse,
    ResourceOwnerResponse, ResourceResponse, UserSummaryResponse, VersionResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            email_verified: user.email_verified,
            is_banned: user.is_banned,
            created_at: user.created_at,
        }
    }
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(summary: UserSummary) -> Self {
        let UserSummary {
            user,
            resource_count,
        } = summary;
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            role: user.role.as_str().to_string(),
            email_verified: user.email_verified,
            is_banned: user.is_banned,
            created_at: user.created_at,
            resource_count,
        }
    }
}

// ============================================================================
// Resource Mappers
// ============================================================================

impl From<&Resource> for ResourceResponse {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id.to_string(),
            user_id: resource.owner_id.to_string(),
            title: resource.title.clone(),
            description: resource.description.clone(),
            plugin_type: resource.plugin_type.clone(),
            category: resource.category.clone(),
            content: resource.content.clone(),
            current_version: resource.current_version.clone(),
            is_visible: resource.is_visible,
            is_approved: resource.is_approved,
            download_count: resource.download_count,
            deleted_at: resource.deleted_at,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        }
    }
}

impl From<&ResourceVersion> for VersionResponse {
    fn from(version: &ResourceVersion) -> Self {
        Self {
            id: version.id.to_string(),
            resource_id: version.resource_id.to_string(),
            version: version.version.clone(),
            changelog: version.changelog.clone(),
            zip_url: version.zip_url.to_string(),
            image_urls: version.image_urls.iter().map(ToString::to_string).collect(),
            file_size: version.file_size.clone(),
            created_at: version.created_at,
        }
    }
}

impl From<&ResourceAuthor> for AuthorResponse {
    fn from(author: &ResourceAuthor) -> Self {
        Self {
            id: author.id.to_string(),
            username: author.username.clone(),
        }
    }
}

impl From<&ResourceAuthor> for ResourceOwnerResponse {
    fn from(author: &ResourceAuthor) -> Self {
        Self {
            id: author.id.to_string(),
            username: author.username.clone(),
            email: author.email.clone(),
            email_verified: author.email_verified,
            is_banned: author.is_banned,
        }
    }
}

impl From<ResourceListing> for ResourceListItemResponse {
    fn from(listing: ResourceListing) -> Self {
        Self {
            resource: ResourceResponse::from(&listing.resource),
            author: AuthorResponse::from(&listing.author),
            latest_version: listing.latest_version.as_ref().map(VersionResponse::from),
            version_count: listing.version_count,
        }
    }
}

impl From<ResourceListing> for AdminResourceListItemResponse {
    fn from(listing: ResourceListing) -> Self {
        Self {
            resource: ResourceResponse::from(&listing.resource),
            owner: ResourceOwnerResponse::from(&listing.author),
            latest_version: listing.latest_version.as_ref().map(VersionResponse::from),
            version_count: listing.version_count,
        }
    }
}
