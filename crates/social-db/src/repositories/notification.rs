//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use social_core::entities::Notification;
use social_core::error::DomainError;
use social_core::traits::{NotificationRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::mappers::notifications_from_models;
use crate::models::NotificationModel;

use super::error::map_db_error;

const NOTIFICATION_COLUMNS: &str = "id, user_id, kind, post_id, actor_id, created_at, is_read";

/// Insert a notification on an open connection (usually a transaction)
pub(crate) async fn insert_notification(
    conn: &mut PgConnection,
    notification: &Notification,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO notifications (id, user_id, kind, post_id, actor_id, created_at, is_read)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(notification.id.into_inner())
    .bind(notification.user_id.into_inner())
    .bind(notification.kind.as_str())
    .bind(notification.post_id.map(Snowflake::into_inner))
    .bind(notification.actor_id.map(Snowflake::into_inner))
    .bind(notification.created_at)
    .bind(notification.is_read)
    .execute(conn)
    .await?;

    Ok(())
}

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Notification::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>> {
        let results = sqlx::query_as::<_, NotificationModel>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        notifications_from_models(results)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
