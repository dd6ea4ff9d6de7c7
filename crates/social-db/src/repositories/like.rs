//! PostgreSQL implementation of LikeRepository
//!
//! The `(post_id, user_id)` primary key arbitrates concurrent toggles: the
//! losing insert surfaces as `LikeConflict` and its transaction rolls back
//! together with the notification it carried.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Like, Notification};
use social_core::error::DomainError;
use social_core::traits::{LikeRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::models::LikeModel;

use super::error::{map_db_error, map_insert_error};
use super::notification::insert_notification;

/// PostgreSQL implementation of LikeRepository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    /// Create a new PgLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self))]
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Like>> {
        let result = sqlx::query_as::<_, LikeModel>(
            r"
            SELECT post_id, user_id, created_at
            FROM likes
            WHERE post_id = $1 AND user_id = $2
            ",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Like::from))
    }

    #[instrument(skip(self))]
    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, like, notification), fields(post_id = %like.post_id, user_id = %like.user_id))]
    async fn create_with_notification(
        &self,
        like: &Like,
        notification: Option<&Notification>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO likes (post_id, user_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(like.post_id.into_inner())
        .bind(like.user_id.into_inner())
        .bind(like.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                || DomainError::LikeConflict,
                || DomainError::PostNotFound(like.post_id),
            )
        })?;

        if let Some(notification) = notification {
            insert_notification(&mut *tx, notification)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_with_notification(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        recipient: Snowflake,
    ) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        if removed == 0 {
            // lost a race with another unlike; nothing to retract
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(false);
        }

        sqlx::query(
            r"
            DELETE FROM notifications
            WHERE id = (
                SELECT id FROM notifications
                WHERE kind = 'like' AND user_id = $1 AND post_id = $2 AND actor_id = $3
                ORDER BY created_at, id
                LIMIT 1
            )
            ",
        )
        .bind(recipient.into_inner())
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(true)
    }
}
