//! Resource entity - a downloadable plugin configuration with moderation state

use chrono::{DateTime, Utc};

use super::version::ResourceVersion;
use crate::value_objects::Snowflake;

/// A user-submitted downloadable item
///
/// Lifecycle: created pending approval (`is_approved = false`,
/// `is_visible = true`); admins toggle approval and visibility, the owner
/// toggles visibility; `deleted_at` is terminal and the row is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub title: String,
    pub description: String,
    pub plugin_type: String,
    pub category: Option<String>,
    pub content: String,
    /// Label of the most recently created version
    pub current_version: String,
    pub is_visible: bool,
    pub is_approved: bool,
    pub download_count: i64,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated metadata for a new resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDraft {
    pub title: String,
    pub description: String,
    pub plugin_type: String,
    pub category: Option<String>,
    pub content: String,
}

/// Partial update; `None` leaves a field untouched
///
/// `category` is tri-state: `None` = unchanged, `Some(None)` or a blank
/// string = cleared, `Some(Some(value))` = replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub plugin_type: Option<String>,
    pub category: Option<Option<String>>,
    pub content: Option<String>,
}

impl ResourcePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.plugin_type.is_none()
            && self.category.is_none()
            && self.content.is_none()
    }
}

impl Resource {
    /// Create a resource in the pending-approval state
    pub fn new(
        id: Snowflake,
        owner_id: Snowflake,
        draft: ResourceDraft,
        current_version: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            title: draft.title,
            description: draft.description,
            plugin_type: draft.plugin_type,
            category: normalize_category(draft.category),
            content: draft.content,
            current_version,
            is_visible: true,
            is_approved: false,
            download_count: 0,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Approved, visible and not deleted
    #[inline]
    pub fn is_public(&self) -> bool {
        self.is_approved && self.is_visible && !self.is_deleted()
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Flip approval and return the new state
    pub fn toggle_approval(&mut self) -> bool {
        self.is_approved = !self.is_approved;
        self.updated_at = Utc::now();
        self.is_approved
    }

    /// Flip visibility and return the new state
    pub fn toggle_visibility(&mut self) -> bool {
        self.is_visible = !self.is_visible;
        self.updated_at = Utc::now();
        self.is_visible
    }

    pub fn mark_deleted(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    /// Apply a partial update. Validation happens before this is called.
    pub fn apply_patch(&mut self, patch: ResourcePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(plugin_type) = patch.plugin_type {
            self.plugin_type = plugin_type;
        }
        if let Some(category) = patch.category {
            self.category = normalize_category(category);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }
}

fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Owner details attached to listing rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAuthor {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    pub is_banned: bool,
}

/// Listing row: the resource with its author, version count and newest version
#[derive(Debug, Clone)]
pub struct ResourceListing {
    pub resource: Resource,
    pub author: ResourceAuthor,
    pub version_count: i64,
    pub latest_version: Option<ResourceVersion>,
}
