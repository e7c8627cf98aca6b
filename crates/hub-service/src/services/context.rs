//! Service context - dependency container for services
//!
//! Holds the repositories, the asset store, the upload limiter, the mailer
//! and the id/token helpers needed by services.

use std::sync::Arc;

use chrono::Duration;
use hub_common::auth::JwtService;
use hub_common::AppConfig;
use hub_core::assets::AssetStore;
use hub_core::traits::{
    Mailer, RateLimiter, ResourceRepository, UserRepository, VerificationTokenRepository,
    VersionRepository,
};
use hub_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Tunables read from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Versions kept per resource
    pub retention_keep: usize,
    pub verification_ttl: Duration,
    /// Base URL used in verification links
    pub site_url: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            retention_keep: 10,
            verification_ttl: Duration::hours(24),
            site_url: "http://localhost:3000".to_string(),
        }
    }
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            retention_keep: config.retention.keep,
            verification_ttl: Duration::hours(config.mail.verification_token_ttl_hours),
            site_url: config.mail.site_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    resource_repo: Arc<dyn ResourceRepository>,
    version_repo: Arc<dyn VersionRepository>,
    token_repo: Arc<dyn VerificationTokenRepository>,

    // Collaborators
    asset_store: Arc<dyn AssetStore>,
    rate_limiter: Arc<dyn RateLimiter>,
    mailer: Arc<dyn Mailer>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    settings: ServiceSettings,
}

impl ServiceContext {
    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn resource_repo(&self) -> &dyn ResourceRepository {
        self.resource_repo.as_ref()
    }

    pub fn version_repo(&self) -> &dyn VersionRepository {
        self.version_repo.as_ref()
    }

    pub fn token_repo(&self) -> &dyn VerificationTokenRepository {
        self.token_repo.as_ref()
    }

    // === Collaborators ===

    pub fn asset_store(&self) -> &dyn AssetStore {
        self.asset_store.as_ref()
    }

    pub fn rate_limiter(&self) -> &dyn RateLimiter {
        self.rate_limiter.as_ref()
    }

    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("asset_store", &"dyn AssetStore")
            .field("rate_limiter", &"dyn RateLimiter")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    resource_repo: Option<Arc<dyn ResourceRepository>>,
    version_repo: Option<Arc<dyn VersionRepository>>,
    token_repo: Option<Arc<dyn VerificationTokenRepository>>,
    asset_store: Option<Arc<dyn AssetStore>>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
    mailer: Option<Arc<dyn Mailer>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    settings: Option<ServiceSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn resource_repo(mut self, repo: Arc<dyn ResourceRepository>) -> Self {
        self.resource_repo = Some(repo);
        self
    }

    pub fn version_repo(mut self, repo: Arc<dyn VersionRepository>) -> Self {
        self.version_repo = Some(repo);
        self
    }

    pub fn token_repo(mut self, repo: Arc<dyn VerificationTokenRepository>) -> Self {
        self.token_repo = Some(repo);
        self
    }

    pub fn asset_store(mut self, store: Arc<dyn AssetStore>) -> Self {
        self.asset_store = Some(store);
        self
    }

    pub fn rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Optional; defaults to [`ServiceSettings::default`]
    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    /// or the retention count is zero
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let settings = self.settings.unwrap_or_default();
        if settings.retention_keep == 0 {
            return Err(ServiceError::validation("retention_keep must be at least 1"));
        }

        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            resource_repo: self
                .resource_repo
                .ok_or_else(|| ServiceError::validation("resource_repo is required"))?,
            version_repo: self
                .version_repo
                .ok_or_else(|| ServiceError::validation("version_repo is required"))?,
            token_repo: self
                .token_repo
                .ok_or_else(|| ServiceError::validation("token_repo is required"))?,
            asset_store: self
                .asset_store
                .ok_or_else(|| ServiceError::validation("asset_store is required"))?,
            rate_limiter: self
                .rate_limiter
                .ok_or_else(|| ServiceError::validation("rate_limiter is required"))?,
            mailer: self
                .mailer
                .ok_or_else(|| ServiceError::validation("mailer is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            settings,
        })
    }
}
