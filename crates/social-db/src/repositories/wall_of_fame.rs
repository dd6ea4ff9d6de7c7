//! PostgreSQL implementation of WallOfFameRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::WallOfFameEntry;
use social_core::traits::{RepoResult, WallOfFameRepository};

use crate::models::WallOfFameModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgWallOfFameRepository {
    pool: PgPool,
}

impl PgWallOfFameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WallOfFameRepository for PgWallOfFameRepository {
    #[instrument(skip(self))]
    async fn latest(&self) -> RepoResult<Option<WallOfFameEntry>> {
        let result = sqlx::query_as::<_, WallOfFameModel>(
            r"
            SELECT id, post_id, title, media_url, description, likes, post_created_at, archived_at
            FROM wall_of_fame
            ORDER BY archived_at DESC, id DESC
            LIMIT 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(WallOfFameEntry::from))
    }
}
