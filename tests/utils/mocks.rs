use async_trait::async_trait;
use tokio::sync::Mutex;

use deltaboard::report::{LeaderboardReport, ReportError, ReportSink};

/// Report sink that records every delivered report for assertions.
#[derive(Default)]
pub struct RecordingReportSink {
    reports: Mutex<Vec<LeaderboardReport>>,
}

impl RecordingReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reports(&self) -> Vec<LeaderboardReport> {
        self.reports.lock().await.clone()
    }
}

#[async_trait]
impl ReportSink for RecordingReportSink {
    async fn deliver(&self, report: &LeaderboardReport) -> Result<(), ReportError> {
        self.reports.lock().await.push(report.clone());
        Ok(())
    }
}
