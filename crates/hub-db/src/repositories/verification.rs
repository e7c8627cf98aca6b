//! PostgreSQL implementation of VerificationTokenRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hub_core::entities::VerificationToken;
use hub_core::error::DomainError;
use hub_core::traits::{RepoResult, VerificationTokenRepository};
use hub_core::value_objects::Snowflake;

use crate::models::VerificationTokenModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgVerificationTokenRepository {
    pool: PgPool,
}

impl PgVerificationTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationTokenRepository for PgVerificationTokenRepository {
    #[instrument(skip(self, token), fields(user_id = %token.user_id))]
    async fn create(&self, token: &VerificationToken) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO verification_tokens (token, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&token.token)
        .bind(token.user_id.into_inner())
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<VerificationToken>> {
        let result = sqlx::query_as::<_, VerificationTokenModel>(
            r"
            SELECT token, user_id, expires_at, created_at
            FROM verification_tokens
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(VerificationToken::from))
    }

    #[instrument(skip_all)]
    async fn delete(&self, token: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM verification_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::VerificationTokenNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM verification_tokens WHERE user_id = $1")
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
