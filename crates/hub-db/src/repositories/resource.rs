//! PostgreSQL implementation of ResourceRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use hub_core::entities::{Resource, ResourceListing, ResourceVersion};
use hub_core::policy::OwnerScope;
use hub_core::traits::{RepoResult, ResourceFilter, ResourceRepository};
use hub_core::value_objects::Snowflake;

use crate::mappers::encode_image_urls;
use crate::models::{ResourceListingModel, ResourceModel};

use super::error::{escape_like, map_db_error, resource_not_found};

const LISTING_SELECT: &str = r"
    SELECT r.id, r.owner_id, r.title, r.description, r.plugin_type, r.category, r.content,
           r.current_version, r.is_visible, r.is_approved, r.download_count, r.deleted_at,
           r.created_at, r.updated_at,
           u.username AS author_username,
           u.email AS author_email,
           u.email_verified AS author_email_verified,
           u.is_banned AS author_is_banned,
           (SELECT COUNT(*) FROM resource_versions v WHERE v.resource_id = r.id) AS version_count,
           lv.id AS latest_id,
           lv.version AS latest_version,
           lv.changelog AS latest_changelog,
           lv.zip_url AS latest_zip_url,
           lv.image_urls AS latest_image_urls,
           lv.file_size AS latest_file_size,
           lv.created_at AS latest_created_at
    FROM resources r
    JOIN users u ON u.id = r.owner_id
    LEFT JOIN LATERAL (
        SELECT v.id, v.version, v.changelog, v.zip_url, v.image_urls, v.file_size, v.created_at
        FROM resource_versions v
        WHERE v.resource_id = r.id
        ORDER BY v.created_at DESC, v.id DESC
        LIMIT 1
    ) lv ON TRUE
    WHERE TRUE";

/// PostgreSQL implementation of ResourceRepository
#[derive(Clone)]
pub struct PgResourceRepository {
    pool: PgPool,
}

impl PgResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE conditions and ordering for a listing filter
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ResourceFilter) {
    if !filter.include_deleted {
        qb.push(" AND r.deleted_at IS NULL");
    }

    match filter.scope {
        OwnerScope::Public => {
            qb.push(" AND r.is_approved AND r.is_visible");
        }
        OwnerScope::PublicOrOwner(owner) => {
            qb.push(" AND ((r.is_approved AND r.is_visible) OR r.owner_id = ");
            qb.push_bind(owner.into_inner());
            qb.push(")");
        }
        OwnerScope::All => {}
    }

    if let Some(approved) = filter.approved {
        qb.push(" AND r.is_approved = ");
        qb.push_bind(approved);
    }
    if let Some(visible) = filter.visible {
        qb.push(" AND r.is_visible = ");
        qb.push_bind(visible);
    }
    if let Some(plugin_type) = &filter.plugin_type {
        qb.push(" AND r.plugin_type = ");
        qb.push_bind(plugin_type.clone());
    }
    if let Some(category) = &filter.category {
        qb.push(" AND r.category = ");
        qb.push_bind(category.clone());
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        qb.push(" AND (r.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR r.description ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    qb.push(" ORDER BY r.created_at DESC, r.id DESC");
}

#[async_trait]
impl ResourceRepository for PgResourceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Resource>> {
        let result = sqlx::query_as::<_, ResourceModel>(
            r"
            SELECT id, owner_id, title, description, plugin_type, category, content,
                   current_version, is_visible, is_approved, download_count, deleted_at,
                   created_at, updated_at
            FROM resources
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Resource::from))
    }

    #[instrument(skip(self, resource, version), fields(resource_id = %resource.id))]
    async fn create_with_initial_version(
        &self,
        resource: &Resource,
        version: &ResourceVersion,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO resources (id, owner_id, title, description, plugin_type, category,
                                   content, current_version, is_visible, is_approved,
                                   download_count, deleted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(resource.id.into_inner())
        .bind(resource.owner_id.into_inner())
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.plugin_type)
        .bind(&resource.category)
        .bind(&resource.content)
        .bind(&resource.current_version)
        .bind(resource.is_visible)
        .bind(resource.is_approved)
        .bind(resource.download_count)
        .bind(resource.deleted_at)
        .bind(resource.created_at)
        .bind(resource.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO resource_versions (id, resource_id, version, changelog, zip_url,
                                           image_urls, file_size, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(version.id.into_inner())
        .bind(resource.id.into_inner())
        .bind(&version.version)
        .bind(&version.changelog)
        .bind(version.zip_url.as_str())
        .bind(encode_image_urls(&version.image_urls))
        .bind(&version.file_size)
        .bind(version.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, resource), fields(resource_id = %resource.id))]
    async fn update(&self, resource: &Resource) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE resources
            SET title = $2, description = $3, plugin_type = $4, category = $5, content = $6,
                is_visible = $7, is_approved = $8, deleted_at = $9, updated_at = $10
            WHERE id = $1
            ",
        )
        .bind(resource.id.into_inner())
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.plugin_type)
        .bind(&resource.category)
        .bind(&resource.content)
        .bind(resource.is_visible)
        .bind(resource.is_approved)
        .bind(resource.deleted_at)
        .bind(resource.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(resource_not_found(resource.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_current_version(&self, id: Snowflake, version: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE resources
            SET current_version = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(version)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(resource_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_download_count(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE resources
            SET download_count = download_count + 1
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(resource_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &ResourceFilter) -> RepoResult<Vec<ResourceListing>> {
        let mut qb = QueryBuilder::<Postgres>::new(LISTING_SELECT);
        push_filter(&mut qb, filter);

        let rows = qb
            .build_query_as::<ResourceListingModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ResourceListing::from).collect())
    }

    #[instrument(skip(self))]
    async fn titles_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT title FROM resources
            WHERE owner_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(owner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
