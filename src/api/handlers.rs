//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    placement::{Placement, WindowSize},
    state::{AppState, Control},
};
use super::responses::{
    CloseResponse, ControlResponse, HealthResponse, ResizeRequest, StatusResponse,
};

async fn control(state: &AppState, control: Control) -> Result<Json<ControlResponse>, StatusCode> {
    match state.send_control(control).await {
        Ok(frame) => {
            info!("{} pressed - countdown {} at {}", control.as_str(), frame.run_state, frame.display);
            Ok(Json(ControlResponse::new(control.as_str(), frame)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", control.as_str(), e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /start-stop - The modal Start/Stop button
pub async fn start_stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    control(&state, Control::StartStop).await
}

/// Handle POST /start - Start the countdown if idle
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    control(&state, Control::Start).await
}

/// Handle POST /stop - Pause the countdown if running
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    control(&state, Control::Stop).await
}

/// Handle POST /reset - Restore the configured time
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    control(&state, Control::Reset).await
}

/// Handle POST /close - The window's close button
pub async fn close_handler(State(state): State<Arc<AppState>>) -> Json<CloseResponse> {
    state.request_close();
    Json(CloseResponse::closing())
}

/// Handle GET /status - Return what is shown and where
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let placement = match state.get_placement() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to get placement: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        frame: state.current_frame(),
        placement,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /placement - Current window placement
pub async fn placement_handler(State(state): State<Arc<AppState>>) -> Result<Json<Placement>, StatusCode> {
    state.get_placement().map(Json).map_err(|e| {
        error!("Failed to get placement: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle POST /resize - Re-anchor the window after a size change
pub async fn resize_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResizeRequest>,
) -> Result<Json<Placement>, StatusCode> {
    if request.width == 0 || request.height == 0 {
        warn!("Rejecting resize to {}x{}", request.width, request.height);
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let window = WindowSize {
        width: request.width,
        height: request.height,
    };
    state.resize(window).map(Json).map_err(|e| {
        error!("Failed to resize: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
