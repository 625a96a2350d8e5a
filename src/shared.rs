use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::commands::CommandDispatcher;
use crate::ingest::IncomingMessage;
use crate::report::LeaderboardReporter;

/// Shared application state containing all dependencies. Everything is
/// constructor-injected; there are no process-wide globals.
#[derive(Clone)]
pub struct AppState {
    pub message_tx: mpsc::Sender<IncomingMessage>,
    pub reporter: Arc<LeaderboardReporter>,
    pub dispatcher: Arc<CommandDispatcher>,
}

impl AppState {
    pub fn new(
        message_tx: mpsc::Sender<IncomingMessage>,
        reporter: Arc<LeaderboardReporter>,
        dispatcher: Arc<CommandDispatcher>,
    ) -> Self {
        Self {
            message_tx,
            reporter,
            dispatcher,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::UnknownCommand(name) => {
                (StatusCode::BAD_REQUEST, format!("Unknown command: {}", name))
            }
            AppError::UnknownMetric(name) => {
                (StatusCode::BAD_REQUEST, format!("Unknown metric: {}", name))
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
