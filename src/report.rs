use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::stats::{LeaderboardMetric, PlayerStats, StatsError, StatsRepository};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),

    #[error("Delivery error: {0}")]
    #[allow(dead_code)] // Error variant for sinks with fallible delivery
    Delivery(String),
}

/// One row of a leaderboard. Ranks are 1-based and contiguous, even across
/// ties; every row carries all four counters regardless of the sort metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub player: String,
    pub stats: PlayerStats,
}

/// What a leaderboard query produces: either ranked rows, or the explicit
/// "no data" sentinel when nothing has been recorded since the last reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeaderboardReport {
    NoData {
        metric: LeaderboardMetric,
    },
    Ranked {
        metric: LeaderboardMetric,
        rows: Vec<LeaderboardRow>,
    },
}

impl LeaderboardReport {
    pub fn metric(&self) -> LeaderboardMetric {
        match self {
            LeaderboardReport::NoData { metric } => *metric,
            LeaderboardReport::Ranked { metric, .. } => *metric,
        }
    }
}

/// Builds ranked reports from single consistent snapshots of the stats store.
pub struct LeaderboardReporter {
    stats: Arc<dyn StatsRepository>,
}

impl LeaderboardReporter {
    pub fn new(stats: Arc<dyn StatsRepository>) -> Self {
        Self { stats }
    }

    #[instrument(skip(self))]
    pub async fn report(&self, metric: LeaderboardMetric) -> Result<LeaderboardReport, ReportError> {
        let snapshot = self.stats.snapshot(metric).await?;
        if snapshot.is_empty() {
            return Ok(LeaderboardReport::NoData { metric });
        }

        let rows = snapshot
            .into_iter()
            .enumerate()
            .map(|(index, (player, stats))| LeaderboardRow {
                rank: index as u32 + 1,
                player,
                stats,
            })
            .collect();
        Ok(LeaderboardReport::Ranked { metric, rows })
    }
}

/// Outbound boundary: receives a finished report and owns all presentation
/// and delivery from there.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn deliver(&self, report: &LeaderboardReport) -> Result<(), ReportError>;
}

/// Report sink that renders leaderboards into the log, one line per rank.
pub struct TracingReportSink;

#[async_trait]
impl ReportSink for TracingReportSink {
    async fn deliver(&self, report: &LeaderboardReport) -> Result<(), ReportError> {
        match report {
            LeaderboardReport::NoData { metric } => {
                info!(metric = %metric, "No games tracked yet");
            }
            LeaderboardReport::Ranked { metric, rows } => {
                info!(metric = %metric, rows = rows.len(), "Leaderboard");
                for row in rows {
                    info!("{}", format_row(row));
                }
            }
        }
        Ok(())
    }
}

/// `1. Alice — Games: 3, Wins: 2, Losses: 1, Rating: +25`
fn format_row(row: &LeaderboardRow) -> String {
    let rating = row.stats.net_rating_change;
    let rating = if rating > 0 {
        format!("+{}", rating)
    } else {
        rating.to_string()
    };
    format!(
        "{}. {} — Games: {}, Wins: {}, Losses: {}, Rating: {}",
        row.rank, row.player, row.stats.games_played, row.stats.wins, row.stats.losses, rating
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{InMemoryStatsRepository, RatingEvent};

    fn event(player: &str, delta: i64) -> RatingEvent {
        RatingEvent {
            player: player.to_string(),
            delta,
        }
    }

    async fn seeded_reporter(events: &[(&str, i64)]) -> LeaderboardReporter {
        let stats = Arc::new(InMemoryStatsRepository::new());
        for (player, delta) in events {
            stats.record_event(event(player, *delta)).await.unwrap();
        }
        LeaderboardReporter::new(stats)
    }

    #[tokio::test]
    async fn empty_store_yields_the_no_data_sentinel() {
        let reporter = seeded_reporter(&[]).await;
        let report = reporter.report(LeaderboardMetric::Wins).await.unwrap();
        assert_eq!(
            report,
            LeaderboardReport::NoData {
                metric: LeaderboardMetric::Wins
            }
        );
    }

    #[tokio::test]
    async fn ranks_are_one_based_and_contiguous_across_ties() {
        // A and C tie on games played, B trails.
        let reporter = seeded_reporter(&[("A", 1), ("A", 1), ("B", 1), ("C", 1), ("C", -1)]).await;

        let report = reporter
            .report(LeaderboardMetric::GamesPlayed)
            .await
            .unwrap();
        let LeaderboardReport::Ranked { rows, .. } = report else {
            panic!("expected ranked report");
        };

        let ranked: Vec<(u32, &str)> = rows
            .iter()
            .map(|row| (row.rank, row.player.as_str()))
            .collect();
        assert_eq!(ranked, vec![(1, "A"), (2, "C"), (3, "B")]);
    }

    #[tokio::test]
    async fn every_row_carries_all_four_counters() {
        let reporter = seeded_reporter(&[("Alice", 15), ("Alice", -5)]).await;

        let report = reporter
            .report(LeaderboardMetric::NetRatingChange)
            .await
            .unwrap();
        let LeaderboardReport::Ranked { rows, .. } = report else {
            panic!("expected ranked report");
        };

        assert_eq!(rows[0].stats.games_played, 2);
        assert_eq!(rows[0].stats.wins, 1);
        assert_eq!(rows[0].stats.losses, 1);
        assert_eq!(rows[0].stats.net_rating_change, 10);
    }

    #[test]
    fn rows_render_in_the_chat_format() {
        let row = LeaderboardRow {
            rank: 1,
            player: "Alice".to_string(),
            stats: PlayerStats {
                games_played: 3,
                wins: 2,
                losses: 1,
                net_rating_change: 25,
            },
        };
        assert_eq!(
            format_row(&row),
            "1. Alice — Games: 3, Wins: 2, Losses: 1, Rating: +25"
        );

        let negative = LeaderboardRow {
            rank: 2,
            player: "Bob".to_string(),
            stats: PlayerStats {
                games_played: 1,
                wins: 0,
                losses: 1,
                net_rating_change: -20,
            },
        };
        assert_eq!(
            format_row(&negative),
            "2. Bob — Games: 1, Wins: 0, Losses: 1, Rating: -20"
        );
    }
}
