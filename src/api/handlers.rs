//! HTTP endpoint handlers
//!
//! Each control button of the countdown window maps to one endpoint.

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    services::LocalHost,
    state::{AppState, RunState, TimerSettings},
    timer::{HostChannel, HostMessage},
};
use super::responses::{ApiResponse, StatusResponse, HealthResponse};

fn current_run(state: &AppState) -> Result<RunState, StatusCode> {
    state.get_run_state().map_err(|e| {
        error!("Failed to get run state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle POST /start-timer - Start a new run with the given settings
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<TimerSettings>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let host = LocalHost::new(Arc::clone(&state));
    match host.notify(HostMessage::StartTimer(settings)).await {
        Ok(()) => {
            info!("Start-timer endpoint called");
            Ok(Json(ApiResponse::ok(
                format!(
                    "Timer started: {} stations of {}s with {}s breaks",
                    settings.num_repeats, settings.duration, settings.break_duration
                ),
                current_run(&state)?,
            )))
        }
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /pause - Request a pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let run = current_run(&state)?;
    if !run.is_running() {
        info!("Pause ignored, no run in progress");
        return Ok(Json(ApiResponse::ignored("No run in progress".to_string(), run)));
    }

    let host = LocalHost::new(Arc::clone(&state));
    match state.pause.request(&host).await {
        Ok(true) => Ok(Json(ApiResponse::ok(
            "Pause requested".to_string(),
            current_run(&state)?,
        ))),
        Ok(false) => Ok(Json(ApiResponse::ignored(
            "Already paused".to_string(),
            current_run(&state)?,
        ))),
        Err(e) => {
            error!("Failed to request pause: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /resume - Close the pause window
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let host = LocalHost::new(Arc::clone(&state));
    if host.resume() {
        Ok(Json(ApiResponse::ok("Resumed".to_string(), current_run(&state)?)))
    } else {
        Ok(Json(ApiResponse::ignored("Not paused".to_string(), current_run(&state)?)))
    }
}

/// Handle POST /restart - Re-send the last settings
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let settings = match state.last_settings() {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            warn!("Restart requested before any run was started");
            return Err(StatusCode::CONFLICT);
        }
        Err(e) => {
            error!("Failed to read settings: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let host = LocalHost::new(Arc::clone(&state));
    match host.notify(HostMessage::StartTimer(settings)).await {
        Ok(()) => {
            info!("Restart endpoint called");
            Ok(Json(ApiResponse::ok("Timer restarted".to_string(), current_run(&state)?)))
        }
        Err(e) => {
            error!("Failed to restart timer: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

async fn set_muted(state: Arc<AppState>, muted: bool) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_muted(muted) {
        Ok(_) => Ok(Json(ApiResponse::ok(
            if muted { "Audio muted" } else { "Audio unmuted" }.to_string(),
            current_run(&state)?,
        ))),
        Err(e) => {
            error!("Failed to set mute flag: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /mute - Silence the cue
pub async fn mute_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    set_muted(state, true).await
}

/// Handle POST /unmute - Re-enable the cue
pub async fn unmute_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    set_muted(state, false).await
}

/// Handle POST /exit - Ask the host to terminate
pub async fn exit_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let run = current_run(&state)?;
    let host = LocalHost::new(Arc::clone(&state));
    match host.notify(HostMessage::Exit).await {
        Ok(()) => Ok(Json(ApiResponse::ok("Exiting".to_string(), run))),
        Err(e) => {
            error!("Failed to request exit: {}", e);
            Ok(Json(ApiResponse::error(e.to_string(), run)))
        }
    }
}

/// Handle POST /counter - Click on the counter, which exits once the run is complete
pub async fn counter_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let clickable = match state.get_display() {
        Ok(display) => display.counter_clickable(),
        Err(e) => {
            error!("Failed to get display state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if clickable {
        exit_handler(State(state)).await
    } else {
        Ok(Json(ApiResponse::ignored(
            "Counter is not clickable while counting".to_string(),
            current_run(&state)?,
        )))
    }
}

/// Handle GET /status - Return the run snapshot and window view model
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let run = current_run(&state)?;

    let display = match state.get_display() {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to get display state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (settings, muted) = match (state.last_settings(), state.is_muted()) {
        (Ok(settings), Ok(muted)) => (settings, muted),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to read timer settings: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        run,
        display,
        settings,
        muted,
        pause_window_open: state.is_pause_window_open(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
