//! Weekly Wall-of-Fame contest rules
//!
//! A round tallies every live post, picks the most-liked one, archives it,
//! notifies its creator and then clears the board for the next week.

use crate::entities::{Notification, Post, WallOfFameEntry};

/// A post together with its like count at tally time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTally {
    pub post: Post,
    pub likes: i64,
}

/// Pick the round's winner from tallies in creation order.
///
/// A later post only displaces the incumbent with strictly more likes, so
/// ties go to the earliest post. With any posts present there is always a
/// winner, even when nobody liked anything.
pub fn select_winner(tallies: &[PostTally]) -> Option<&PostTally> {
    let mut winner: Option<&PostTally> = None;
    for tally in tallies {
        match winner {
            Some(best) if tally.likes <= best.likes => {}
            _ => winner = Some(tally),
        }
    }
    winner
}

/// Everything a store needs to commit a round in one transaction
#[derive(Debug, Clone)]
pub struct RoundSettlement {
    pub entry: WallOfFameEntry,
    pub announcement: Notification,
}

/// Row counts removed while settling a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct PurgeReport {
    pub notifications: u64,
    pub archive_entries: u64,
    pub likes: u64,
    pub comments: u64,
    pub posts: u64,
}
