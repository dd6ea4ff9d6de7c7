//! In-process weekly contest timer
//!
//! Sleeps until the configured weekday and time (UTC), runs the contest and
//! schedules the next week. The contest itself keeps no timer state.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use social_common::ContestConfig;
use social_service::{ContestOutcome, ContestService};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::state::AppState;

/// First `weekday hour:minute` UTC strictly after `now`
pub fn next_occurrence(now: DateTime<Utc>, weekday: Weekday, hour: u32, minute: u32) -> DateTime<Utc> {
    let days_ahead = (i64::from(weekday.num_days_from_monday())
        - i64::from(now.weekday().num_days_from_monday()))
    .rem_euclid(7);
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
    let candidate = (now.date_naive() + Duration::days(days_ahead))
        .and_time(time)
        .and_utc();

    if candidate > now {
        candidate
    } else {
        candidate + Duration::weeks(1)
    }
}

/// Spawn the weekly timer; it runs until the runtime shuts down
pub fn spawn_weekly_contest(state: AppState) -> JoinHandle<()> {
    let ContestConfig {
        weekday,
        hour,
        minute,
        ..
    } = state.config().contest.clone();

    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let next = next_occurrence(now, weekday, hour, minute);
            info!(next_run = %next, "Next contest scheduled");

            tokio::time::sleep((next - now).to_std().unwrap_or_default()).await;

            match ContestService::new(state.service_context()).run_contest().await {
                Ok(ContestOutcome::Winner { entry, .. }) => {
                    info!(post_id = %entry.post_id, likes = entry.likes, "Scheduled contest finished");
                }
                Ok(outcome) => info!(?outcome, "Scheduled contest finished"),
                Err(e) => error!(error = %e, "Scheduled contest failed"),
            }
        }
    })
}
