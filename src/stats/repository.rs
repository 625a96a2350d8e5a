use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{LeaderboardMetric, PlayerStats, RatingEvent, StatsError};

/// The aggregation engine's one shared mutable resource. All reads and writes
/// go through these three operations; nothing else may touch the table.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Folds one parsed rating line into the table, creating a
    /// zero-initialized entry on first reference to a name.
    async fn record_event(&self, event: RatingEvent) -> Result<(), StatsError>;

    /// A consistent point-in-time view, sorted descending by the requested
    /// metric. Ties keep first-insertion order. An empty vec means no player
    /// has been recorded since the last reset.
    async fn snapshot(
        &self,
        metric: LeaderboardMetric,
    ) -> Result<Vec<(String, PlayerStats)>, StatsError>;

    /// Atomically empties the whole table. Concurrent readers see either the
    /// full pre-reset state or the empty table, never a mix.
    async fn reset(&self) -> Result<(), StatsError>;
}

#[derive(Debug, Clone)]
struct PlayerEntry {
    stats: PlayerStats,
    /// Insertion sequence number, the explicit tie-break for ranking.
    first_seen: u64,
}

#[derive(Debug, Default)]
struct AggregateTable {
    players: HashMap<String, PlayerEntry>,
    insert_seq: u64,
}

/// In-memory aggregate table behind a single exclusive lock. One lock around
/// update, snapshot and reset is the whole concurrency story: message volume
/// is low relative to any reasonable processing rate.
#[derive(Debug, Default)]
pub struct InMemoryStatsRepository {
    table: RwLock<AggregateTable>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn record_event(&self, event: RatingEvent) -> Result<(), StatsError> {
        let RatingEvent { player, delta } = event;

        let mut guard = self.table.write().await;
        let table = &mut *guard;

        let is_new = !table.players.contains_key(&player);
        let seq = table.insert_seq;
        let entry = table.players.entry(player).or_insert_with(|| PlayerEntry {
            stats: PlayerStats::default(),
            first_seen: seq,
        });
        if is_new {
            table.insert_seq += 1;
        }

        entry.stats.games_played += 1;
        entry.stats.net_rating_change += delta;
        if delta > 0 {
            entry.stats.wins += 1;
        } else if delta < 0 {
            entry.stats.losses += 1;
        }

        Ok(())
    }

    async fn snapshot(
        &self,
        metric: LeaderboardMetric,
    ) -> Result<Vec<(String, PlayerStats)>, StatsError> {
        let table = self.table.read().await;

        let mut entries: Vec<(String, PlayerStats, u64)> = table
            .players
            .iter()
            .map(|(name, entry)| (name.clone(), entry.stats.clone(), entry.first_seen))
            .collect();
        entries.sort_by_key(|(_, stats, first_seen)| (Reverse(stats.metric_value(metric)), *first_seen));

        Ok(entries
            .into_iter()
            .map(|(name, stats, _)| (name, stats))
            .collect())
    }

    async fn reset(&self) -> Result<(), StatsError> {
        let mut table = self.table.write().await;
        let cleared = table.players.len();
        table.players.clear();
        table.insert_seq = 0;
        debug!(cleared_players = cleared, "Aggregate table cleared");
        Ok(())
    }
}
