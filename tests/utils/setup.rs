use std::sync::Arc;

use axum::Router;
use tokio::sync::mpsc;

use deltaboard::commands::CommandDispatcher;
use deltaboard::gateway;
use deltaboard::ingest::{IncomingMessage, IngestPipeline};
use deltaboard::report::LeaderboardReporter;
use deltaboard::shared::AppState;
use deltaboard::stats::{InMemoryStatsRepository, StatsRepository};

use super::mocks::RecordingReportSink;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub stats: Arc<dyn StatsRepository>,
    pub pipeline: Arc<IngestPipeline>,
    pub reporter: Arc<LeaderboardReporter>,
    pub dispatcher: Arc<CommandDispatcher>,
    pub sink: Arc<RecordingReportSink>,
    pub router: Router,
    /// The test owns the receiving end of the gateway's ingest channel, so
    /// queued messages can be drained deterministically.
    pub message_rx: mpsc::Receiver<IncomingMessage>,
}

impl TestSetup {
    /// Pops the next queued gateway message and runs it through the pipeline.
    pub async fn drain_one_message(&mut self) -> usize {
        let message = self
            .message_rx
            .recv()
            .await
            .expect("a message should be queued");
        self.pipeline.process_message(&message).await
    }
}

pub struct TestSetupBuilder {
    lines: Vec<String>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Seeds the stats store by ingesting these chat lines during build.
    pub fn with_lines(mut self, lines: Vec<&str>) -> Self {
        self.lines = lines.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub async fn build(self) -> TestSetup {
        let stats: Arc<dyn StatsRepository> = Arc::new(InMemoryStatsRepository::new());
        let pipeline = Arc::new(IngestPipeline::new(stats.clone()));
        let reporter = Arc::new(LeaderboardReporter::new(stats.clone()));
        let sink = Arc::new(RecordingReportSink::new());
        let dispatcher = Arc::new(CommandDispatcher::new(reporter.clone(), sink.clone()));

        let (message_tx, message_rx) = mpsc::channel(16);
        let router = gateway::router(AppState::new(
            message_tx,
            reporter.clone(),
            dispatcher.clone(),
        ));

        for line in &self.lines {
            pipeline.ingest(line).await;
        }

        TestSetup {
            stats,
            pipeline,
            reporter,
            dispatcher,
            sink,
            router,
            message_rx,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
