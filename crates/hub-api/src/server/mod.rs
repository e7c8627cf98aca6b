//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hub_cache::{InMemoryRateLimiter, RateLimitPolicy, RedisPool, RedisRateLimiter};
use hub_common::{AppConfig, AppError, JwtService};
use hub_core::traits::RateLimiter;
use hub_core::{AssetLimits, SnowflakeGenerator};
use hub_db::{
    create_pool, run_migrations, PgResourceRepository, PgUserRepository,
    PgVerificationTokenRepository, PgVersionRepository,
};
use hub_service::{LogMailer, ServiceContextBuilder, ServiceSettings};
use hub_storage::LocalAssetStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// How often idle in-process limiter windows are dropped
const LIMITER_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are merged after the middleware so probes bypass the
/// request limiter.
pub fn create_app(state: AppState) -> Router {
    let api = apply_middleware_with_config(create_router(), state.config());
    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&hub_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!(dir = %config.database.migrations_dir, "Migrations applied");
    }

    let policy = RateLimitPolicy::uploads(&config.rate_limit);
    let (rate_limiter, redis): (Arc<dyn RateLimiter>, Option<Arc<RedisPool>>) =
        match &config.redis {
            Some(redis_config) => {
                info!("Connecting to Redis...");
                let redis_pool =
                    RedisPool::from_config(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
                info!("Upload limiter backed by Redis");
                (
                    Arc::new(RedisRateLimiter::new(redis_pool.clone(), policy)),
                    Some(Arc::new(redis_pool)),
                )
            }
            None => {
                let limiter = Arc::new(InMemoryRateLimiter::new(policy));
                limiter.clone().spawn_purge_task(LIMITER_PURGE_INTERVAL);
                info!("Upload limiter running in-process");
                (limiter, None)
            }
        };

    let asset_store = LocalAssetStore::new(
        &config.storage.root,
        AssetLimits::from_megabytes(
            config.storage.max_archive_size_mb,
            config.storage.max_image_size_mb,
        ),
    );
    asset_store
        .ensure_directories()
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    info!(root = %config.storage.root, "Asset storage ready");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .resource_repo(Arc::new(PgResourceRepository::new(pool.clone())))
        .version_repo(Arc::new(PgVersionRepository::new(pool.clone())))
        .token_repo(Arc::new(PgVerificationTokenRepository::new(pool.clone())))
        .asset_store(Arc::new(asset_store))
        .rate_limiter(rate_limiter)
        .mailer(Arc::new(LogMailer::new(config.mail.from.clone())))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .settings(ServiceSettings::from_config(&config))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool, redis))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Build state from configuration and serve until shutdown
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    run_server(create_app(state), addr).await
}
