//! PostgreSQL implementation of ContestRepository
//!
//! Settlement runs in one transaction under a transaction-scoped advisory
//! lock, so two replicas firing the weekly job cannot interleave purges.
//! Likes and comments stay locked against writers until commit, so no row
//! can reference a post between the purge deletes.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use social_core::contest::{PostTally, PurgeReport, RoundSettlement};
use social_core::error::DomainError;
use social_core::traits::{ContestRepository, RepoResult};

use crate::models::PostTallyModel;

use super::error::map_db_error;
use super::notification::insert_notification;

/// Advisory lock key shared by every settling process ("WOF" in ASCII)
const CONTEST_LOCK_KEY: i64 = 0x0057_4F46;

#[derive(Clone)]
pub struct PgContestRepository {
    pool: PgPool,
}

impl PgContestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContestRepository for PgContestRepository {
    #[instrument(skip(self))]
    async fn tally(&self) -> RepoResult<Vec<PostTally>> {
        let rows = sqlx::query_as::<_, PostTallyModel>(
            r"
            SELECT p.id, p.creator_id, p.title, p.media_ref, p.media_url, p.description,
                   p.created_at, COUNT(l.user_id) AS likes
            FROM posts p
            LEFT JOIN likes l ON l.post_id = p.id
            GROUP BY p.id
            ORDER BY p.created_at, p.id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PostTally::from).collect())
    }

    #[instrument(skip(self, settlement), fields(post_id = %settlement.entry.post_id))]
    async fn settle(&self, settlement: &RoundSettlement) -> RepoResult<PurgeReport> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(CONTEST_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query("LOCK TABLE likes, comments IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let winner_alive = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
            .bind(settlement.entry.post_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .is_some();
        if !winner_alive {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(DomainError::PostNotFound(settlement.entry.post_id));
        }

        let mut report = PurgeReport::default();

        report.notifications = sqlx::query("DELETE FROM notifications")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        report.archive_entries = sqlx::query("DELETE FROM wall_of_fame")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        let entry = &settlement.entry;
        sqlx::query(
            r"
            INSERT INTO wall_of_fame (id, post_id, title, media_url, description, likes, post_created_at, archived_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(entry.id.into_inner())
        .bind(entry.post_id.into_inner())
        .bind(&entry.title)
        .bind(&entry.media_url)
        .bind(entry.description.as_deref())
        .bind(entry.likes)
        .bind(entry.post_created_at)
        .bind(entry.archived_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        insert_notification(&mut *tx, &settlement.announcement)
            .await
            .map_err(map_db_error)?;

        report.likes = sqlx::query("DELETE FROM likes")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        report.comments = sqlx::query("DELETE FROM comments")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        report.posts = sqlx::query("DELETE FROM posts")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        tx.commit().await.map_err(map_db_error)?;

        info!(
            notifications = report.notifications,
            likes = report.likes,
            comments = report.comments,
            posts = report.posts,
            "Contest round settled"
        );
        Ok(report)
    }
}
