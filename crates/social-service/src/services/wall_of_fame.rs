//! Wall of Fame read path

use tracing::instrument;

use crate::dto::WallOfFameResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Wall of Fame service
pub struct WallOfFameService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WallOfFameService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Most recent winner, `None` before the first round
    #[instrument(skip(self))]
    pub async fn latest(&self) -> ServiceResult<Option<WallOfFameResponse>> {
        let entry = self.ctx.wall_of_fame_repo().latest().await?;
        Ok(entry.map(WallOfFameResponse::from))
    }
}
