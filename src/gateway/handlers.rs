use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use crate::commands::CommandKind;
use crate::ingest::IncomingMessage;
use crate::report::LeaderboardReport;
use crate::shared::{AppError, AppState};
use crate::stats::LeaderboardMetric;

/// `POST /messages`: the message source adapter. Queues one chat message's
/// textual parts for ingestion.
pub async fn receive_message(
    State(state): State<AppState>,
    Json(message): Json<IncomingMessage>,
) -> Result<StatusCode, AppError> {
    state.message_tx.send(message).await.map_err(|err| {
        // Only fails once the ingest task has stopped, i.e. during shutdown.
        error!(error = %err, "Ingest channel closed");
        AppError::Internal
    })?;
    Ok(StatusCode::ACCEPTED)
}

/// `POST /commands/:command`: runs one leaderboard command and forwards the
/// result to the configured report sink.
pub async fn trigger_command(
    State(state): State<AppState>,
    Path(command): Path<String>,
) -> Result<StatusCode, AppError> {
    let kind =
        CommandKind::from_str(&command).map_err(|_| AppError::UnknownCommand(command))?;

    state.dispatcher.dispatch(kind).await.map_err(|err| {
        error!(error = %err, "Command dispatch failed");
        AppError::Internal
    })?;
    Ok(StatusCode::ACCEPTED)
}

/// `GET /leaderboards/:metric`: returns the current leaderboard for one
/// metric, or the "no data" sentinel when nothing has been recorded.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(metric): Path<String>,
) -> Result<Json<LeaderboardReport>, AppError> {
    let metric =
        LeaderboardMetric::from_str(&metric).map_err(|_| AppError::UnknownMetric(metric))?;

    let report = state.reporter.report(metric).await.map_err(|err| {
        error!(error = %err, "Leaderboard query failed");
        AppError::Internal
    })?;
    Ok(Json(report))
}
