use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// One successfully parsed rating line. Transient: produced by the parser and
/// folded into the aggregate table immediately, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingEvent {
    /// The literal parsed name, case-sensitive, no normalization. Two
    /// different spellings are two different players.
    pub player: String,
    pub delta: i64,
}

/// Running aggregates for one player since the last daily reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    /// Games with a strictly positive delta.
    pub wins: u32,
    /// Games with a strictly negative delta. Zero-delta games count toward
    /// `games_played` but neither wins nor losses.
    pub losses: u32,
    pub net_rating_change: i64,
}

/// The sortable aggregate columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeaderboardMetric {
    GamesPlayed,
    Wins,
    Losses,
    NetRatingChange,
}

impl PlayerStats {
    /// The value this player sorts by for the given metric.
    pub fn metric_value(&self, metric: LeaderboardMetric) -> i64 {
        match metric {
            LeaderboardMetric::GamesPlayed => i64::from(self.games_played),
            LeaderboardMetric::Wins => i64::from(self.wins),
            LeaderboardMetric::Losses => i64::from(self.losses),
            LeaderboardMetric::NetRatingChange => self.net_rating_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn metric_names_round_trip_through_strings() {
        assert_eq!(
            LeaderboardMetric::from_str("net_rating_change").unwrap(),
            LeaderboardMetric::NetRatingChange
        );
        assert_eq!(LeaderboardMetric::GamesPlayed.to_string(), "games_played");
        assert!(LeaderboardMetric::from_str("elo").is_err());
    }
}
