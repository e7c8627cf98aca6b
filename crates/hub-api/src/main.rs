//! Resource hub API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p hub-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use hub_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Log format follows APP_ENV: pretty with spans in development, JSON in production.
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        redis = config.redis.is_some(),
        "Starting resource hub API server..."
    );

    if let Err(e) = hub_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
