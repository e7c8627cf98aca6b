//! Schema migrations
//!
//! Migrations are read from a directory at runtime so the crate builds
//! without a database or the SQLx macros.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::Path;
use tracing::info;

/// Apply every pending migration found in `dir`
pub async fn run_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> Result<(), MigrateError> {
    let dir = dir.as_ref();
    let migrator = Migrator::new(dir.to_path_buf()).await?;
    info!(dir = %dir.display(), count = migrator.iter().count(), "Running migrations");
    migrator.run(pool).await
}
