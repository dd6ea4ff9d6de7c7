//! Contest service
//!
//! One weekly round: tally every post, archive the most-liked one on the
//! Wall of Fame, notify its creator and clear the board. Settlement is a
//! single store transaction; a round that loses its winner between tally and
//! settlement starts over.

use std::sync::atomic::{AtomicBool, Ordering};

use social_core::contest::{select_winner, PurgeReport, RoundSettlement};
use social_core::entities::{Notification, WallOfFameEntry};
use tracing::{info, instrument, warn};

use crate::dto::{ContestRunResponse, WallOfFameResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::resolve_media_url;

/// Attempts per run when the winning post disappears before settlement
pub const MAX_SETTLE_ATTEMPTS: u32 = 3;

/// How a contest run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContestOutcome {
    /// No posts this round; nothing was touched
    NoWinner,
    /// Winner archived and the board purged
    Winner {
        entry: WallOfFameEntry,
        report: PurgeReport,
    },
    /// Another run was in flight in this process
    AlreadyRunning,
}

impl From<ContestOutcome> for ContestRunResponse {
    fn from(outcome: ContestOutcome) -> Self {
        match outcome {
            ContestOutcome::NoWinner => Self {
                outcome: "noWinner",
                entry: None,
                purged: None,
            },
            ContestOutcome::Winner { entry, report } => Self {
                outcome: "winner",
                entry: Some(WallOfFameResponse::from(entry)),
                purged: Some(report),
            },
            ContestOutcome::AlreadyRunning => Self {
                outcome: "alreadyRunning",
                entry: None,
                purged: None,
            },
        }
    }
}

/// Clears the single-flight flag when the run ends, however it ends
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Contest service
pub struct ContestService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ContestService<'a> {
    /// Create a new ContestService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run one round. Safe to invoke again after any failure.
    #[instrument(skip(self))]
    pub async fn run_contest(&self) -> ServiceResult<ContestOutcome> {
        let flag = self.ctx.contest_flag();
        if flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("Contest round already running, skipping");
            return Ok(ContestOutcome::AlreadyRunning);
        }
        let _guard = RunGuard(flag);

        let outcome = self.run_with_retry().await?;
        match &outcome {
            ContestOutcome::NoWinner => info!("Contest round ended without posts"),
            ContestOutcome::Winner { entry, report } => info!(
                post_id = %entry.post_id,
                likes = entry.likes,
                posts_purged = report.posts,
                "Contest round settled with a winner"
            ),
            ContestOutcome::AlreadyRunning => {}
        }
        Ok(outcome)
    }

    async fn run_with_retry(&self) -> ServiceResult<ContestOutcome> {
        let mut attempt = 1;
        loop {
            match self.run_round().await {
                Err(e) if e.is_post_not_found() && attempt < MAX_SETTLE_ATTEMPTS => {
                    warn!(attempt, error = %e, "Winning post vanished before settlement, restarting round");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn run_round(&self) -> ServiceResult<ContestOutcome> {
        let tallies = self.ctx.contest_repo().tally().await?;
        let Some(winner) = select_winner(&tallies) else {
            return Ok(ContestOutcome::NoWinner);
        };

        let media_url = resolve_media_url(self.ctx, &winner.post)
            .await?
            .unwrap_or_default();
        let entry = WallOfFameEntry::snapshot(self.ctx.generate_id(), &winner.post, winner.likes, media_url);
        let announcement = Notification::wall_of_fame(
            self.ctx.generate_id(),
            winner.post.creator_id,
            winner.post.id,
        );

        let settlement = RoundSettlement {
            entry,
            announcement,
        };
        let report = self.ctx.contest_repo().settle(&settlement).await?;

        Ok(ContestOutcome::Winner {
            entry: settlement.entry,
            report,
        })
    }
}
