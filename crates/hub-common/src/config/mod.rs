//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    MailConfig, RateLimitConfig, RedisConfig, RetentionConfig, ServerConfig, SnowflakeConfig,
    StorageConfig,
};
