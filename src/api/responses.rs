//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{DisplayState, RunState, TimerSettings};

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub run: RunState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, run: RunState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            run,
        }
    }

    /// The control took effect
    pub fn ok(message: String, run: RunState) -> Self {
        Self::new("ok".to_string(), message, run)
    }

    /// The control was valid but had nothing to do
    pub fn ignored(message: String, run: RunState) -> Self {
        Self::new("ignored".to_string(), message, run)
    }

    /// Create an error response
    pub fn error(message: String, run: RunState) -> Self {
        Self::new("error".to_string(), message, run)
    }
}

/// Full status with the window view model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub run: RunState,
    pub display: DisplayState,
    pub settings: Option<TimerSettings>,
    pub muted: bool,
    pub pause_window_open: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
