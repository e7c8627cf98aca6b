//! Test helpers for integration tests
//!
//! Spawns a server on an ephemeral port against the database named by
//! `DATABASE_URL`, with assets written to a temporary directory.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use hub_api::{create_app, create_app_state, AppState};
use hub_common::{
    hash_password, AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    MailConfig, RateLimitConfig, RedisConfig, RetentionConfig, ServerConfig, SnowflakeConfig,
    StorageConfig,
};
use hub_core::entities::{User, UserRole, VerificationToken};
use hub_core::traits::{UserRepository, VerificationTokenRepository};
use hub_core::Snowflake;
use reqwest::{multipart::Form, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{unique_suffix, AuthResponse, LoginRequest, RegisterRequest, PASSWORD};

/// API prefix
pub const API: &str = "/api/v1";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: AppState,
    _storage: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let storage = TempDir::new()?;
        let config = test_config(&storage)?;
        Self::start_with_config(config, storage).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig, storage: TempDir) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            state,
            _storage: storage,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API}{path}", self.base_url())
    }

    fn authed(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET outside the API prefix (health probes)
    pub async fn get_root(&self, path: &str) -> Result<Response> {
        let url = format!("{}{path}", self.base_url());
        Ok(self.client.get(&url).send().await?)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let builder = self.client.get(self.url(path));
        Ok(Self::authed(builder, token).send().await?)
    }

    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        let builder = self.client.post(self.url(path)).json(body);
        Ok(Self::authed(builder, token).send().await?)
    }

    /// POST a multipart form
    pub async fn post_form(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?)
    }

    pub async fn put<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// PATCH without a body (toggles)
    pub async fn patch(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    // === Account setup ===

    /// Register through the API and return the request plus the new user id
    pub async fn register(&self) -> Result<(RegisterRequest, Snowflake)> {
        let request = RegisterRequest::unique();
        let response = self.post("/auth/register", None, &request).await?;
        let body: crate::fixtures::RegisterResponse =
            assert_json(response, StatusCode::CREATED).await?;
        Ok((request, body.user.id.parse()?))
    }

    /// Log in and return the bearer token
    pub async fn login(&self, request: &RegisterRequest) -> Result<String> {
        let response = self
            .post("/auth/login", None, &LoginRequest::from_register(request))
            .await?;
        let auth: AuthResponse = assert_json(response, StatusCode::OK).await?;
        Ok(auth.access_token)
    }

    /// Registered, verified member with a bearer token
    pub async fn verified_member(&self) -> Result<(Snowflake, String)> {
        let (request, id) = self.register().await?;
        self.state
            .service_context()
            .user_repo()
            .set_email_verified(id)
            .await?;
        Ok((id, self.login(&request).await?))
    }

    /// Admin accounts cannot be registered through the API; insert one directly
    pub async fn admin(&self) -> Result<(Snowflake, String)> {
        let ctx = self.state.service_context();
        let suffix = unique_suffix();
        let mut user = User::new(
            ctx.generate_id(),
            format!("a{suffix}"),
            format!("admin{suffix}@example.com"),
        );
        user.role = UserRole::Admin;
        user.email_verified = true;
        ctx.user_repo()
            .create(&user, &hash_password(PASSWORD)?)
            .await?;

        let request = RegisterRequest {
            username: user.username.clone(),
            email: user.email.clone(),
            password: PASSWORD.to_string(),
        };
        Ok((user.id, self.login(&request).await?))
    }

    /// Store a verification token for `user_id` and return its value
    pub async fn issue_token(&self, user_id: Snowflake, ttl: chrono::Duration) -> Result<String> {
        let token = VerificationToken::issue(user_id, ttl);
        self.state
            .service_context()
            .token_repo()
            .create(&token)
            .await?;
        Ok(token.token)
    }
}

/// Create a test configuration
///
/// Only `DATABASE_URL` is required; `REDIS_URL` switches the upload limiter
/// to Redis when set.
pub fn test_config(storage: &TempDir) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")?;
    let redis = std::env::var("REDIS_URL").ok().map(|url| RedisConfig {
        url,
        max_connections: 4,
    });

    Ok(AppConfig {
        app: AppSettings {
            name: "resource-hub-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
            migrations_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../crates/hub-db/migrations")
                .to_string(),
            run_migrations: true,
        },
        redis,
        jwt: JwtConfig {
            secret: "integration-test-secret-at-least-32-bytes".to_string(),
            access_token_expiry: 3600,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
            upload_attempts: 1000,
            upload_window_secs: 60,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        storage: StorageConfig {
            root: storage.path().to_string_lossy().into_owned(),
            max_archive_size_mb: 5,
            max_image_size_mb: 1,
            max_request_size_mb: 10,
        },
        retention: RetentionConfig { keep: 10 },
        mail: MailConfig {
            site_url: "http://localhost:3000".to_string(),
            from: "noreply@example.com".to_string(),
            verification_token_ttl_hours: 24,
        },
        snowflake: SnowflakeConfig { worker_id: 31 },
    })
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
