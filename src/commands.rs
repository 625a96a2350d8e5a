use std::sync::Arc;

use strum_macros::{Display, EnumIter, EnumString};
use tracing::instrument;

use crate::report::{LeaderboardReporter, ReportError, ReportSink};
use crate::stats::LeaderboardMetric;

/// The command trigger surface: one trigger per supported leaderboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    /// Combined view, sorted by games played.
    Leaderboard,
    GamesLeaderboard,
    WinsLeaderboard,
    LossesLeaderboard,
    RatingLeaderboard,
}

impl CommandKind {
    pub fn metric(self) -> LeaderboardMetric {
        match self {
            CommandKind::Leaderboard | CommandKind::GamesLeaderboard => {
                LeaderboardMetric::GamesPlayed
            }
            CommandKind::WinsLeaderboard => LeaderboardMetric::Wins,
            CommandKind::LossesLeaderboard => LeaderboardMetric::Losses,
            CommandKind::RatingLeaderboard => LeaderboardMetric::NetRatingChange,
        }
    }
}

/// Runs a command: build the report for its metric, hand it to the sink.
pub struct CommandDispatcher {
    reporter: Arc<LeaderboardReporter>,
    sink: Arc<dyn ReportSink>,
}

impl CommandDispatcher {
    pub fn new(reporter: Arc<LeaderboardReporter>, sink: Arc<dyn ReportSink>) -> Self {
        Self { reporter, sink }
    }

    #[instrument(skip(self))]
    pub async fn dispatch(&self, command: CommandKind) -> Result<(), ReportError> {
        let report = self.reporter.report(command.metric()).await?;
        self.sink.deliver(&report).await
    }
}
