//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    catalog::Catalog,
    error::{Result, ZenError},
    state::{AppState, ZoneSnapshot},
};
use super::responses::{ApiResponse, HealthResponse, RestartParams, StatusResponse};

type CommandResult = std::result::Result<Json<ApiResponse>, StatusCode>;

fn error_status(e: &ZenError) -> StatusCode {
    if e.is_unknown_index() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Turn the outcome of a state command into an HTTP response
fn command_response(result: Result<ZoneSnapshot>, message: &str) -> CommandResult {
    match result {
        Ok(zone) => {
            info!("{}", message);
            Ok(Json(ApiResponse::ok(message, zone)))
        }
        Err(e) if e.is_unknown_index() => {
            warn!("Rejected command: {}", e);
            Err(error_status(&e))
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(error_status(&e))
        }
    }
}

/// Handle POST /breathing/:index/start - Select and start a breathing exercise
pub async fn start_exercise_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> CommandResult {
    command_response(state.start_exercise(index), "Breathing exercise started")
}

/// Handle POST /breathing/toggle - Pause or resume the breathing exercise
pub async fn toggle_breathing_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    command_response(state.toggle_breathing(), "Breathing exercise toggled")
}

/// Handle POST /breathing/reset - Rewind the breathing exercise
pub async fn reset_breathing_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    command_response(state.reset_breathing(), "Breathing exercise reset")
}

/// Handle POST /breathing/restart - Run the exercise again for a fixed length
pub async fn restart_breathing_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RestartParams>,
) -> CommandResult {
    let seconds = params.seconds.unwrap_or(state.restart_seconds);
    command_response(state.restart_breathing(seconds), "Breathing exercise restarted")
}

/// Handle POST /meditation/:index/start - Select and start a guided program
pub async fn start_meditation_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> CommandResult {
    command_response(state.start_meditation(index), "Meditation started")
}

/// Handle POST /meditation/toggle - Pause or resume the meditation
pub async fn toggle_meditation_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    command_response(state.toggle_meditation(), "Meditation toggled")
}

/// Handle POST /meditation/reset - Rewind the meditation
pub async fn reset_meditation_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    command_response(state.reset_meditation(), "Meditation reset")
}

/// Handle POST /meditation/end - Leave the meditation session
pub async fn end_meditation_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    command_response(state.end_meditation(), "Meditation ended")
}

/// Handle POST /postures/:index/select - Show a posture with the meditation
pub async fn select_posture_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> CommandResult {
    command_response(state.select_posture(index), "Posture selected")
}

/// Handle POST /affirmations/next - Rotate to the next affirmation
pub async fn next_affirmation_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    command_response(state.next_affirmation(), "Affirmation advanced")
}

/// Handle POST /back - The host shell navigated away; nothing changes
pub async fn back_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    command_response(state.get_snapshot(), "Navigated back")
}

/// Handle GET /status - Return the current zone snapshot
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<StatusResponse>, StatusCode> {
    let zone = match state.get_snapshot() {
        Ok(zone) => zone,
        Err(e) => {
            error!("Failed to get zone state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        zone,
        tick_period_ms: state.tick_period_ms(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /catalog - Return the content catalog
pub async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<Catalog> {
    Json(state.catalog.as_ref().clone())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
