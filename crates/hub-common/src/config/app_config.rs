//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Unset optional variables fall back to defaults; a variable that
//! is set but does not parse is an error rather than a silent default.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    /// Shared rate-limit backend; in-process counters are used when absent
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub retention: RetentionConfig,
    pub mail: MailConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Global request limiter
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Upload attempts per user and window
    #[serde(default = "default_upload_attempts")]
    pub upload_attempts: u32,
    #[serde(default = "default_upload_window_secs")]
    pub upload_window_secs: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Asset storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory served as the public web root; assets land below it
    #[serde(default = "default_storage_root")]
    pub root: String,
    #[serde(default = "default_max_archive_size")]
    pub max_archive_size_mb: u64,
    #[serde(default = "default_max_image_size")]
    pub max_image_size_mb: u64,
    /// Upper bound for a whole multipart request body
    #[serde(default = "default_max_request_size")]
    pub max_request_size_mb: u64,
}

/// Version history configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RetentionConfig {
    #[serde(default = "default_retention_keep")]
    pub keep: usize,
}

/// Verification mail configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_email_from")]
    pub from: String,
    #[serde(default = "default_verification_ttl")]
    pub verification_token_ttl_hours: i64,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "resource-hub".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_migrations_dir() -> String {
    "./migrations".to_string()
}

fn default_true() -> bool {
    true
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_access_token_expiry() -> i64 {
    86_400 // 24 hours
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_upload_attempts() -> u32 {
    5
}

fn default_upload_window_secs() -> u64 {
    300
}

fn default_storage_root() -> String {
    "./public".to_string()
}

fn default_max_archive_size() -> u64 {
    50
}

fn default_max_image_size() -> u64 {
    5
}

fn default_max_request_size() -> u64 {
    100
}

fn default_retention_keep() -> usize {
    10
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_email_from() -> String {
    "noreply@resource-hub.local".to_string()
}

fn default_verification_ttl() -> i64 {
    24
}

/// Read a required variable
fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

/// Parse an optional variable, falling back to `default` when unset
fn parsed_or<T: FromStr>(name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        _ => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a set variable
    /// cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let redis = match env::var("REDIS_URL") {
            Ok(url) if !url.trim().is_empty() => Some(RedisConfig {
                url,
                max_connections: parsed_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            }),
            _ => None,
        };

        let port_raw = required("API_PORT")?;
        let port = port_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("API_PORT", port_raw.clone()))?;

        let config = Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: parsed_or("APP_ENV", Environment::default)?,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parsed_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                migrations_dir: env::var("DATABASE_MIGRATIONS_DIR")
                    .unwrap_or_else(|_| default_migrations_dir()),
                run_migrations: parsed_or("DATABASE_RUN_MIGRATIONS", default_true)?,
            },
            redis,
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                access_token_expiry: parsed_or(
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    default_access_token_expiry,
                )?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parsed_or("RATE_LIMIT_BURST", default_burst)?,
                upload_attempts: parsed_or("UPLOAD_RATE_LIMIT_ATTEMPTS", default_upload_attempts)?,
                upload_window_secs: parsed_or(
                    "UPLOAD_RATE_LIMIT_WINDOW_SECS",
                    default_upload_window_secs,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| split_list(&s))
                    .unwrap_or_default(),
            },
            storage: StorageConfig {
                root: env::var("STORAGE_ROOT").unwrap_or_else(|_| default_storage_root()),
                max_archive_size_mb: parsed_or("MAX_ARCHIVE_SIZE_MB", default_max_archive_size)?,
                max_image_size_mb: parsed_or("MAX_IMAGE_SIZE_MB", default_max_image_size)?,
                max_request_size_mb: parsed_or("MAX_REQUEST_SIZE_MB", default_max_request_size)?,
            },
            retention: RetentionConfig {
                keep: parsed_or("VERSION_RETENTION_KEEP", default_retention_keep)?,
            },
            mail: MailConfig {
                site_url: env::var("SITE_URL").unwrap_or_else(|_| default_site_url()),
                from: env::var("EMAIL_FROM").unwrap_or_else(|_| default_email_from()),
                verification_token_ttl_hours: parsed_or(
                    "VERIFICATION_TOKEN_TTL_HOURS",
                    default_verification_ttl,
                )?,
            },
            snowflake: SnowflakeConfig {
                worker_id: parsed_or("WORKER_ID", || 0)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Cross-field checks that env parsing alone cannot express
    fn validate(&self) -> Result<(), ConfigError> {
        if self.retention.keep == 0 {
            return Err(ConfigError::InvalidValue(
                "VERSION_RETENTION_KEEP",
                "must be at least 1".to_string(),
            ));
        }
        if self.rate_limit.upload_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "UPLOAD_RATE_LIMIT_ATTEMPTS",
                "must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
