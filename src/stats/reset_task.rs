use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, LocalResult, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::{error, info, instrument};

use super::repository::StatsRepository;

/// Configuration for the daily reset task
#[derive(Debug, Clone)]
pub struct ResetConfig {
    /// Timezone whose local midnight is the reset boundary.
    pub timezone: Tz,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Paris,
        }
    }
}

/// Duration from `now` until the next local midnight strictly after it in
/// `timezone`. An input that is exactly midnight waits a full day; on
/// daylight-saving transition days the wait follows the timezone's rules
/// (23 or 25 hours between midnights).
pub fn next_reset_delay(now: DateTime<Utc>, timezone: Tz) -> Duration {
    let local_now = now.with_timezone(&timezone);
    let next_day = local_now.date_naive() + Days::new(1);

    // Around a daylight-saving jump a local time can be ambiguous or not
    // exist at all. Take the earliest valid instant at or after 00:00.
    let mut naive = next_day.and_time(NaiveTime::MIN);
    let next_midnight = loop {
        match naive.and_local_timezone(timezone) {
            LocalResult::Single(instant) => break instant,
            LocalResult::Ambiguous(earliest, _) => break earliest,
            LocalResult::None => naive = naive + chrono::Duration::hours(1),
        }
    };

    (next_midnight.with_timezone(&Utc) - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

/// Runs forever: sleep until the next local midnight, clear the aggregate
/// table, recompute. The wait is recomputed from the wall clock every cycle,
/// so clock jumps self-correct on the following iteration and missed
/// midnights are never caught up. Cancelling the task mid-sleep has no side
/// effects.
#[instrument(skip(stats))]
pub async fn start_reset_task(stats: Arc<dyn StatsRepository>, config: ResetConfig) {
    info!(timezone = %config.timezone, "Starting daily leaderboard reset task");

    loop {
        let wait = next_reset_delay(Utc::now(), config.timezone);
        info!(
            wait_secs = wait.as_secs(),
            "Waiting until next local midnight reset"
        );

        tokio::time::sleep(wait).await;

        match stats.reset().await {
            Ok(()) => info!("Leaderboard reset at local midnight"),
            Err(err) => error!(error = %err, "Leaderboard reset failed"),
        }
    }
}
