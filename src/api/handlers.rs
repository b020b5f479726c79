//! Timer and health endpoint handlers

use std::sync::Arc;
use axum::{extract::State, response::Json};
use tracing::{error, info};

use crate::state::AppState;
use super::responses::{ApiError, ErrorResponse, HealthResponse, StatusResponse, TimerResponse, STATUS_SUCCESS};

/// Handle GET /api/timer - Return the timer snapshot and server metadata
pub async fn timer_status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let timer = state.get_timer_snapshot().map_err(|e| {
        error!("Failed to get timer state: {}", e);
        ErrorResponse::internal()
    })?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        status: STATUS_SUCCESS.to_string(),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle POST /api/timer/toggle - Start or pause the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    match state.toggle_timer() {
        Ok(timer) => {
            let message = if timer.is_running { "Timer started" } else { "Timer paused" };
            Ok(Json(TimerResponse::new(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}

/// Handle POST /api/timer/reset - Rewind the current interval
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    match state.reset_timer() {
        Ok(timer) => Ok(Json(TimerResponse::new("Timer reset".to_string(), timer))),
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}

/// Handle POST /api/timer/skip - Move on to the next interval
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    match state.skip_timer() {
        Ok((switch, timer)) => {
            info!("Skip endpoint called - now in {:?}", switch.to);
            let message = format!("Skipped to {}", timer.title);
            Ok(Json(TimerResponse::switched(message, timer, switch)))
        }
        Err(e) => {
            error!("Failed to skip timer: {}", e);
            Err(ErrorResponse::internal())
        }
    }
}

/// Handle GET /api/health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}
