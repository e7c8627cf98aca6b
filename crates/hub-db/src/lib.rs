//! # hub-db
//!
//! Database layer implementing the `hub-core` repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hub_db::{create_pool, run_migrations, DatabaseConfig, PgResourceRepository};
//!
//! async fn example(url: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new(url)).await?;
//!     run_migrations(&pool, "./migrations").await?;
//!     let resources = PgResourceRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgResourceRepository, PgUserRepository, PgVerificationTokenRepository, PgVersionRepository,
};
