//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/breathing/:index/start", post(start_exercise_handler))
        .route("/breathing/toggle", post(toggle_breathing_handler))
        .route("/breathing/reset", post(reset_breathing_handler))
        .route("/breathing/restart", post(restart_breathing_handler))
        .route("/meditation/:index/start", post(start_meditation_handler))
        .route("/meditation/toggle", post(toggle_meditation_handler))
        .route("/meditation/reset", post(reset_meditation_handler))
        .route("/meditation/end", post(end_meditation_handler))
        .route("/postures/:index/select", post(select_posture_handler))
        .route("/affirmations/next", post(next_affirmation_handler))
        .route("/back", post(back_handler))
        .route("/status", get(status_handler))
        .route("/catalog", get(catalog_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
