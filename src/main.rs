use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deltaboard::commands::CommandDispatcher;
use deltaboard::gateway;
use deltaboard::ingest::{spawn_ingest_task, ChannelMessageSource, IngestPipeline};
use deltaboard::report::{LeaderboardReporter, TracingReportSink};
use deltaboard::shared::AppState;
use deltaboard::stats::{
    start_reset_task, InMemoryStatsRepository, ResetConfig, StatsRepository,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deltaboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting deltaboard rating tracker");

    let stats: Arc<dyn StatsRepository> = Arc::new(InMemoryStatsRepository::new());

    // Message intake: gateway -> channel -> pipeline
    let pipeline = Arc::new(IngestPipeline::new(stats.clone()));
    let (message_tx, message_rx) = mpsc::channel(256);
    let _ingest_task = spawn_ingest_task(ChannelMessageSource::new(message_rx), pipeline);

    let reporter = Arc::new(LeaderboardReporter::new(stats.clone()));
    let dispatcher = Arc::new(CommandDispatcher::new(
        reporter.clone(),
        Arc::new(TracingReportSink),
    ));

    // Daily reset, started exactly once per process lifetime.
    let reset_task = tokio::spawn(start_reset_task(stats.clone(), reset_config_from_env()));

    let app_state = AppState::new(message_tx, reporter, dispatcher);
    let app = gateway::router(app_state);

    let addr = std::env::var("DELTABOARD_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Server running on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Abandoning the reset wait mid-sleep has no side effects.
    reset_task.abort();
}

fn reset_config_from_env() -> ResetConfig {
    match std::env::var("DELTABOARD_RESET_TZ") {
        Ok(name) => match name.parse() {
            Ok(timezone) => ResetConfig { timezone },
            Err(_) => {
                warn!(timezone = %name, "Unknown timezone, using default");
                ResetConfig::default()
            }
        },
        Err(_) => ResetConfig::default(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
    }
}
