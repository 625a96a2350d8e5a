// HTTP adapter around the aggregation engine. The chat platform itself is an
// external collaborator; this is the thin host for the two boundary
// interfaces (message intake and leaderboard queries/commands).

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::shared::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/messages", post(handlers::receive_message))
        .route("/commands/:command", post(handlers::trigger_command))
        .route("/leaderboards/:metric", get(handlers::get_leaderboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
