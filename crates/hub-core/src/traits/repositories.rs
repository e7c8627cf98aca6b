//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Resource, ResourceListing, ResourceVersion, User, UserSummary, VerificationToken,
};
use crate::error::DomainError;
use crate::policy::OwnerScope;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by username (case-insensitive)
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Mark the user's email as verified
    async fn set_email_verified(&self, id: Snowflake) -> RepoResult<()>;

    /// Set the ban flag
    async fn set_banned(&self, id: Snowflake, banned: bool) -> RepoResult<()>;

    /// All users, newest first, with the number of resources each owns
    async fn list_with_resource_counts(&self) -> RepoResult<Vec<UserSummary>>;
}

// ============================================================================
// Resource Repository
// ============================================================================

/// Typed listing filter
///
/// `None` leaves a dimension unfiltered. `plugin_type` and `category` of
/// "All" are normalised to `None` by [`ResourceFilter::with_plugin_type`] and
/// [`ResourceFilter::with_category`]. `search` matches title or description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFilter {
    pub approved: Option<bool>,
    pub visible: Option<bool>,
    pub include_deleted: bool,
    pub plugin_type: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub scope: OwnerScope,
}

impl ResourceFilter {
    pub fn new(scope: OwnerScope) -> Self {
        Self {
            approved: None,
            visible: None,
            include_deleted: false,
            plugin_type: None,
            category: None,
            search: None,
            scope,
        }
    }

    pub fn with_plugin_type(mut self, plugin_type: Option<String>) -> Self {
        self.plugin_type = meaningful(plugin_type);
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = meaningful(category);
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    /// Whether a resource passes every dimension of this filter
    ///
    /// Used by in-memory repositories; the SQL implementation builds the
    /// equivalent WHERE clause.
    pub fn matches(&self, resource: &Resource) -> bool {
        if !self.include_deleted && resource.is_deleted() {
            return false;
        }
        if !self.scope.admits(resource) {
            return false;
        }
        if self.approved.is_some_and(|a| a != resource.is_approved)
            || self.visible.is_some_and(|v| v != resource.is_visible)
        {
            return false;
        }
        if self
            .plugin_type
            .as_ref()
            .is_some_and(|p| *p != resource.plugin_type)
        {
            return false;
        }
        if self
            .category
            .as_ref()
            .is_some_and(|c| resource.category.as_ref() != Some(c))
        {
            return false;
        }
        match &self.search {
            Some(needle) => {
                let needle = needle.to_lowercase();
                resource.title.to_lowercase().contains(&needle)
                    || resource.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

fn meaningful(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Find resource by ID, including soft-deleted rows
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Resource>>;

    /// Insert a resource and its first version atomically
    async fn create_with_initial_version(
        &self,
        resource: &Resource,
        version: &ResourceVersion,
    ) -> RepoResult<()>;

    /// Persist editable fields, moderation flags and `deleted_at`
    ///
    /// `download_count` and `current_version` are owned by their dedicated
    /// methods and are not written here.
    async fn update(&self, resource: &Resource) -> RepoResult<()>;

    /// Point the resource at its newest version label
    async fn set_current_version(&self, id: Snowflake, version: &str) -> RepoResult<()>;

    /// Atomically add one to the download counter
    async fn increment_download_count(&self, id: Snowflake) -> RepoResult<()>;

    /// Filtered listing, newest first
    async fn list(&self, filter: &ResourceFilter) -> RepoResult<Vec<ResourceListing>>;

    /// Titles of the owner's non-deleted resources
    async fn titles_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<String>>;
}

// ============================================================================
// Version Repository
// ============================================================================

#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Insert a version record
    async fn create(&self, version: &ResourceVersion) -> RepoResult<()>;

    /// All versions of a resource, newest first (creation time, then id)
    async fn list_by_resource(&self, resource_id: Snowflake) -> RepoResult<Vec<ResourceVersion>>;

    /// Delete one version record
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Verification Token Repository
// ============================================================================

#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    async fn create(&self, token: &VerificationToken) -> RepoResult<()>;

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<VerificationToken>>;

    async fn delete(&self, token: &str) -> RepoResult<()>;

    /// Remove every outstanding token of a user
    async fn delete_by_user(&self, user_id: Snowflake) -> RepoResult<u64>;
}
