//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/toggle", post(toggle_handler))
        .route("/timer/reset", post(reset_timer_handler))
        .route("/timer/remaining", put(set_remaining_handler))
        .route("/quarter/next", post(next_quarter_handler))
        .route("/session/reset", post(reset_session_handler))
        .route("/score/:side", put(set_score_handler))
        .route("/score/:side/increment", post(increment_handler))
        .route("/score/:side/decrement", post(decrement_handler))
        .route("/scores/reset", post(reset_scores_handler))
        .route("/team/:side", put(team_name_handler))
        .route("/sound", put(sound_handler))
        .route("/signal/visibility", post(visibility_handler))
        .route("/signal/focus", post(focus_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
