//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info};

use crate::{
    state::{AppState, Side, Snapshot, QUARTERS},
    utils::{format_clock, EnvSignal},
};
use super::responses::{
    ApiResponse, HealthResponse, SetRemainingRequest, SetScoreRequest, SoundRequest,
    StatusResponse, TeamNameRequest, VisibilityRequest,
};

type ActionResult = Result<(StatusCode, Json<ApiResponse>), StatusCode>;

/// Map an always-applicable action to a response
fn applied(result: Result<Snapshot, String>, message: String) -> ActionResult {
    match result {
        Ok(snapshot) => Ok((StatusCode::OK, Json(ApiResponse::ok(message, snapshot)))),
        Err(e) => {
            error!("{} failed: {}", message, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Map an action that may not apply to 200 or 409
fn conditional(
    result: Result<(bool, Snapshot), String>,
    message: &str,
    rejection: &str,
) -> ActionResult {
    match result {
        Ok((true, snapshot)) => Ok((
            StatusCode::OK,
            Json(ApiResponse::ok(message.to_string(), snapshot)),
        )),
        Ok((false, snapshot)) => {
            debug!("Rejected: {}", rejection);
            Ok((
                StatusCode::CONFLICT,
                Json(ApiResponse::rejected(rejection.to_string(), snapshot)),
            ))
        }
        Err(e) => {
            error!("{} failed: {}", message, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    info!("Start endpoint called");
    conditional(state.start_timer(), "Clock started", "Clock is already running")
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    info!("Pause endpoint called");
    conditional(state.pause_timer(), "Clock paused", "Clock is not running")
}

/// Handle POST /timer/toggle
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    applied(state.toggle_timer(), "Clock toggled".to_string())
}

/// Handle POST /timer/reset
pub async fn reset_timer_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    applied(state.reset_timer(), "Clock reset".to_string())
}

/// Handle PUT /timer/remaining
pub async fn set_remaining_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetRemainingRequest>,
) -> ActionResult {
    conditional(
        state.set_remaining(request.seconds),
        "Remaining time set",
        "Pause the clock before editing it",
    )
}

/// Handle POST /quarter/next
pub async fn next_quarter_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    info!("Next quarter endpoint called");
    conditional(
        state.advance_quarter(),
        "Advanced to next quarter",
        "Already in the final quarter",
    )
}

/// Handle POST /session/reset
pub async fn reset_session_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    applied(state.reset_session(), "Session reset".to_string())
}

/// Handle POST /score/:side/increment
pub async fn increment_handler(
    State(state): State<Arc<AppState>>,
    Path(side): Path<Side>,
) -> ActionResult {
    applied(state.increment_score(side), format!("{:?} score incremented", side))
}

/// Handle POST /score/:side/decrement
pub async fn decrement_handler(
    State(state): State<Arc<AppState>>,
    Path(side): Path<Side>,
) -> ActionResult {
    applied(state.decrement_score(side), format!("{:?} score decremented", side))
}

/// Handle PUT /score/:side
pub async fn set_score_handler(
    State(state): State<Arc<AppState>>,
    Path(side): Path<Side>,
    Json(request): Json<SetScoreRequest>,
) -> ActionResult {
    applied(
        state.set_score(side, &request.raw()),
        format!("{:?} score set", side),
    )
}

/// Handle POST /scores/reset
pub async fn reset_scores_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    applied(state.reset_scores(), "Scores reset".to_string())
}

/// Handle PUT /team/:side
pub async fn team_name_handler(
    State(state): State<Arc<AppState>>,
    Path(side): Path<Side>,
    Json(request): Json<TeamNameRequest>,
) -> ActionResult {
    applied(
        state.set_team_name(side, &request.name),
        format!("{:?} team renamed", side),
    )
}

/// Handle PUT /sound
pub async fn sound_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SoundRequest>,
) -> ActionResult {
    let message = if request.enabled { "Sound enabled" } else { "Sound muted" };
    applied(state.set_sound_enabled(request.enabled), message.to_string())
}

/// Handle POST /signal/visibility - a viewer became visible or hidden
///
/// The signal goes to every hub subscriber. The response is built from a
/// synchronous recompute so it never waits on the reconciler task; both
/// paths converge on the same state.
pub async fn visibility_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VisibilityRequest>,
) -> ActionResult {
    if request.visible {
        state.signals().emit(EnvSignal::BecameVisible);
    } else {
        debug!("Viewer hidden");
    }
    applied(state.snapshot(), "Visibility noted".to_string())
}

/// Handle POST /signal/focus - a viewer gained focus, answered the same
/// way as a visibility change
pub async fn focus_handler(State(state): State<Arc<AppState>>) -> ActionResult {
    state.signals().emit(EnvSignal::FocusGained);
    applied(state.snapshot(), "Focus noted".to_string())
}

/// Handle GET /status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let scoreboard = state.snapshot().map_err(|e| {
        error!("Failed to get scoreboard: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        display: format_clock(scoreboard.time_left),
        final_quarter: scoreboard.quarter == QUARTERS,
        scoreboard,
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
