// Library crate for the deltaboard rating tracker
// This file exposes the public API for integration tests

pub mod commands;
pub mod gateway;
pub mod ingest;
pub mod parser;
pub mod report;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use commands::{CommandDispatcher, CommandKind};
pub use ingest::{ChannelMessageSource, IncomingMessage, IngestPipeline, MessageSource};
pub use report::{LeaderboardReport, LeaderboardReporter, LeaderboardRow, ReportSink};
pub use shared::{AppError, AppState};
pub use stats::{InMemoryStatsRepository, LeaderboardMetric, PlayerStats, StatsRepository};
