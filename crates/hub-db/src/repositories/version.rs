//! PostgreSQL implementation of VersionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hub_core::entities::ResourceVersion;
use hub_core::traits::{RepoResult, VersionRepository};
use hub_core::value_objects::Snowflake;

use crate::mappers::encode_image_urls;
use crate::models::VersionModel;

use super::error::{map_db_error, version_not_found};

/// PostgreSQL implementation of VersionRepository
#[derive(Clone)]
pub struct PgVersionRepository {
    pool: PgPool,
}

impl PgVersionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionRepository for PgVersionRepository {
    #[instrument(skip(self, version), fields(version_id = %version.id, resource_id = %version.resource_id))]
    async fn create(&self, version: &ResourceVersion) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO resource_versions (id, resource_id, version, changelog, zip_url,
                                           image_urls, file_size, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(version.id.into_inner())
        .bind(version.resource_id.into_inner())
        .bind(&version.version)
        .bind(&version.changelog)
        .bind(version.zip_url.as_str())
        .bind(encode_image_urls(&version.image_urls))
        .bind(&version.file_size)
        .bind(version.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_resource(&self, resource_id: Snowflake) -> RepoResult<Vec<ResourceVersion>> {
        let rows = sqlx::query_as::<_, VersionModel>(
            r"
            SELECT id, resource_id, version, changelog, zip_url, image_urls, file_size, created_at
            FROM resource_versions
            WHERE resource_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(resource_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ResourceVersion::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM resource_versions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(version_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgVersionRepository>();
    }
}
