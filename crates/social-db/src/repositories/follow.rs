//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Follow, Notification};
use social_core::error::DomainError;
use social_core::traits::{FollowRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::FollowModel;

use super::error::{map_db_error, map_insert_error};
use super::notification::insert_notification;

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new PgFollowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn find(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<Option<Follow>> {
        let result = sqlx::query_as::<_, FollowModel>(
            r"
            SELECT follower_id, followed_id, created_at
            FROM follows
            WHERE follower_id = $1 AND followed_id = $2
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followed_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Follow::from))
    }

    #[instrument(skip(self))]
    async fn follower_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT follower_id FROM follows WHERE followed_id = $1 ORDER BY created_at",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn following_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT followed_id FROM follows WHERE follower_id = $1 ORDER BY created_at",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self, follow, notification), fields(follower_id = %follow.follower_id, followed_id = %follow.followed_id))]
    async fn create_with_notification(
        &self,
        follow: &Follow,
        notification: &Notification,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO follows (follower_id, followed_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(follow.follower_id.into_inner())
        .bind(follow.followed_id.into_inner())
        .bind(follow.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::AlreadyFollowing,
                || DomainError::UserNotFound(follow.followed_id),
            )
        })?;

        insert_notification(&mut *tx, notification)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, notification))]
    async fn delete_with_notification(
        &self,
        follower_id: Snowflake,
        followed_id: Snowflake,
        notification: &Notification,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
            .bind(follower_id.into_inner())
            .bind(followed_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        if removed == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(DomainError::NotFollowing);
        }

        insert_notification(&mut *tx, notification)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
