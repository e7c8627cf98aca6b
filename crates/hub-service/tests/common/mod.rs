//! Shared fixtures for service tests
//!
//! `InMemoryRepos` implements every repository port over plain vectors so
//! the services can be exercised without PostgreSQL.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hub_cache::{InMemoryRateLimiter, RateLimitPolicy};
use hub_common::auth::{hash_password, JwtService};
use hub_core::assets::{AssetLimits, AssetUpload};
use hub_core::entities::{
    Resource, ResourceAuthor, ResourceListing, ResourceVersion, User, UserRole, UserSummary,
    VerificationToken,
};
use hub_core::traits::{
    Mailer, RepoResult, ResourceFilter, ResourceRepository, UserRepository,
    VerificationTokenRepository, VersionRepository,
};
use hub_core::{DomainError, Snowflake, SnowflakeGenerator};
use hub_service::dto::{CreateResourceRequest, UploadedFiles};
use hub_service::{ServiceContext, ServiceContextBuilder, ServiceSettings};
use hub_storage::InMemoryAssetStore;
use parking_lot::Mutex;

pub const PASSWORD: &str = "correct-horse-battery";

// ============================================================================
// Repositories
// ============================================================================

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    resources: Vec<Resource>,
    versions: Vec<ResourceVersion>,
    tokens: Vec<VerificationToken>,
}

#[derive(Default)]
pub struct InMemoryRepos {
    state: Mutex<State>,
    fail_downloads: AtomicBool,
    fail_version_inserts: AtomicBool,
    fail_version_deletes: AtomicBool,
}

fn unavailable() -> DomainError {
    DomainError::DatabaseError("connection reset".to_string())
}

impl InMemoryRepos {
    pub fn fail_downloads(&self, fail: bool) {
        self.fail_downloads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_version_inserts(&self, fail: bool) {
        self.fail_version_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_version_deletes(&self, fail: bool) {
        self.fail_version_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn resource(&self, id: Snowflake) -> Option<Resource> {
        self.state.lock().resources.iter().find(|r| r.id == id).cloned()
    }

    pub fn user(&self, id: Snowflake) -> Option<User> {
        self.state
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone())
    }

    pub fn versions_of(&self, resource_id: Snowflake) -> Vec<ResourceVersion> {
        let mut versions: Vec<_> = self
            .state
            .lock()
            .versions
            .iter()
            .filter(|v| v.resource_id == resource_id)
            .cloned()
            .collect();
        versions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        versions
    }

    pub fn tokens_of(&self, user_id: Snowflake) -> Vec<VerificationToken> {
        self.state
            .lock()
            .tokens
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn insert_token(&self, token: VerificationToken) {
        self.state.lock().tokens.push(token);
    }

    pub fn insert_user(&self, user: User, password_hash: String) {
        self.state.lock().users.push((user, password_hash));
    }
}

#[async_trait]
impl UserRepository for InMemoryRepos {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.email.eq_ignore_ascii_case(email))
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.username.eq_ignore_ascii_case(username))
            .map(|(u, _)| u.clone()))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.insert_user(user.clone(), password_hash.to_string());
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self
            .state
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, h)| h.clone()))
    }

    async fn set_email_verified(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.email_verified = true;
        Ok(())
    }

    async fn set_banned(&self, id: Snowflake, banned: bool) -> RepoResult<()> {
        let mut state = self.state.lock();
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.is_banned = banned;
        Ok(())
    }

    async fn list_with_resource_counts(&self) -> RepoResult<Vec<UserSummary>> {
        let state = self.state.lock();
        let mut rows: Vec<_> = state
            .users
            .iter()
            .map(|(u, _)| UserSummary {
                user: u.clone(),
                resource_count: state.resources.iter().filter(|r| r.owner_id == u.id).count()
                    as i64,
            })
            .collect();
        rows.sort_by(|a, b| b.user.id.cmp(&a.user.id));
        Ok(rows)
    }
}

#[async_trait]
impl ResourceRepository for InMemoryRepos {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Resource>> {
        Ok(self.resource(id))
    }

    async fn create_with_initial_version(
        &self,
        resource: &Resource,
        version: &ResourceVersion,
    ) -> RepoResult<()> {
        if self.fail_version_inserts.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut state = self.state.lock();
        state.resources.push(resource.clone());
        state.versions.push(version.clone());
        Ok(())
    }

    async fn update(&self, resource: &Resource) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .resources
            .iter_mut()
            .find(|r| r.id == resource.id)
            .ok_or(DomainError::ResourceNotFound(resource.id))?;
        *slot = resource.clone();
        Ok(())
    }

    async fn set_current_version(&self, id: Snowflake, version: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        let slot = state
            .resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::ResourceNotFound(id))?;
        slot.current_version = version.to_string();
        Ok(())
    }

    async fn increment_download_count(&self, id: Snowflake) -> RepoResult<()> {
        if self.fail_downloads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut state = self.state.lock();
        let slot = state
            .resources
            .iter_mut()
            .find(|r| r.id == id && !r.is_deleted())
            .ok_or(DomainError::ResourceNotFound(id))?;
        slot.download_count += 1;
        Ok(())
    }

    async fn list(&self, filter: &ResourceFilter) -> RepoResult<Vec<ResourceListing>> {
        let mut resources: Vec<_> = self
            .state
            .lock()
            .resources
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        resources.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(resources
            .into_iter()
            .map(|resource| {
                let owner = self.user(resource.owner_id).unwrap_or_else(|| {
                    User::new(resource.owner_id, String::new(), String::new())
                });
                let versions = self.versions_of(resource.id);
                ResourceListing {
                    author: ResourceAuthor {
                        id: owner.id,
                        username: owner.username,
                        email: owner.email,
                        email_verified: owner.email_verified,
                        is_banned: owner.is_banned,
                    },
                    version_count: versions.len() as i64,
                    latest_version: versions.into_iter().next(),
                    resource,
                }
            })
            .collect())
    }

    async fn titles_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<String>> {
        Ok(self
            .state
            .lock()
            .resources
            .iter()
            .filter(|r| r.owner_id == owner_id && !r.is_deleted())
            .map(|r| r.title.clone())
            .collect())
    }
}

#[async_trait]
impl VersionRepository for InMemoryRepos {
    async fn create(&self, version: &ResourceVersion) -> RepoResult<()> {
        if self.fail_version_inserts.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.state.lock().versions.push(version.clone());
        Ok(())
    }

    async fn list_by_resource(&self, resource_id: Snowflake) -> RepoResult<Vec<ResourceVersion>> {
        Ok(self.versions_of(resource_id))
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        if self.fail_version_deletes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut state = self.state.lock();
        let before = state.versions.len();
        state.versions.retain(|v| v.id != id);
        if state.versions.len() == before {
            return Err(DomainError::VersionNotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationTokenRepository for InMemoryRepos {
    async fn create(&self, token: &VerificationToken) -> RepoResult<()> {
        self.insert_token(token.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<VerificationToken>> {
        Ok(self
            .state
            .lock()
            .tokens
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    async fn delete(&self, token: &str) -> RepoResult<()> {
        self.state.lock().tokens.retain(|t| t.token != token);
        Ok(())
    }

    async fn delete_by_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let before = state.tokens.len();
        state.tokens.retain(|t| t.user_id != user_id);
        Ok((before - state.tokens.len()) as u64)
    }
}

// ============================================================================
// Mailer
// ============================================================================

/// Records every verification link instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification(&self, to: &str, verification_url: &str) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::InternalError("smtp unavailable".to_string()));
        }
        self.sent
            .lock()
            .push((to.to_string(), verification_url.to_string()));
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct TestHarness {
    pub ctx: ServiceContext,
    pub repos: Arc<InMemoryRepos>,
    pub assets: Arc<InMemoryAssetStore>,
    pub mailer: Arc<RecordingMailer>,
}

/// Harness with a limiter loose enough not to interfere
pub fn harness() -> TestHarness {
    harness_with_policy(RateLimitPolicy::per_window(1000, Duration::from_secs(300)))
}

pub fn harness_with_policy(policy: RateLimitPolicy) -> TestHarness {
    let repos = Arc::new(InMemoryRepos::default());
    let assets = Arc::new(InMemoryAssetStore::new(AssetLimits::default()));
    let mailer = Arc::new(RecordingMailer::default());

    let ctx = ServiceContextBuilder::new()
        .user_repo(repos.clone())
        .resource_repo(repos.clone())
        .version_repo(repos.clone())
        .token_repo(repos.clone())
        .asset_store(assets.clone())
        .rate_limiter(Arc::new(InMemoryRateLimiter::new(policy)))
        .mailer(mailer.clone())
        .jwt_service(Arc::new(JwtService::new(
            "service-test-secret-that-is-long-enough",
            3600,
        )))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(7)))
        .settings(ServiceSettings {
            site_url: "https://hub.test".to_string(),
            ..ServiceSettings::default()
        })
        .build()
        .expect("context builds");

    TestHarness {
        ctx,
        repos,
        assets,
        mailer,
    }
}

impl TestHarness {
    /// Seed a user directly in the repository
    pub fn user(&self, username: &str, role: UserRole, verified: bool) -> User {
        let mut user = User::new(
            self.ctx.generate_id(),
            username.to_string(),
            format!("{username}@example.com"),
        );
        user.role = role;
        user.email_verified = verified;
        self.repos
            .insert_user(user.clone(), hash_password(PASSWORD).expect("hash"));
        user
    }

    pub fn member(&self, username: &str) -> User {
        self.user(username, UserRole::User, true)
    }

    pub fn admin(&self, username: &str) -> User {
        self.user(username, UserRole::Admin, true)
    }
}

// ============================================================================
// Payloads
// ============================================================================

pub fn archive() -> AssetUpload {
    AssetUpload::new("config-pack.zip", vec![7; 2048])
}

pub fn image(name: &str) -> AssetUpload {
    AssetUpload::new(name, vec![1; 512])
}

pub fn files() -> UploadedFiles {
    UploadedFiles {
        archive: Some(archive()),
        images: vec![image("cover.png"), image("inventory.webp")],
    }
}

pub fn create_request(title: &str) -> CreateResourceRequest {
    CreateResourceRequest {
        title: Some(title.to_string()),
        description: Some("A tuned configuration for survival servers".to_string()),
        plugin_type: Some("Essentials".to_string()),
        category: Some("Economy".to_string()),
        content: Some("# essentials config".to_string()),
        version: Some("1.0.0".to_string()),
        changelog: None,
    }
}
