//! HTTP control surface module
//!
//! Stands in for the window's buttons: every endpoint maps to a button press
//! or a read of what the window currently shows.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start-stop", post(start_stop_handler))
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/reset", post(reset_handler))
        .route("/close", post(close_handler))
        .route("/status", get(status_handler))
        .route("/placement", get(placement_handler))
        .route("/resize", post(resize_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
