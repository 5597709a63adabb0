//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{placement::Placement, state::Frame};

/// Response to a button press
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlResponse {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub frame: Frame,
}

impl ControlResponse {
    pub fn new(action: &str, frame: Frame) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Utc::now(),
            frame,
        }
    }
}

/// Full status: what is shown and where
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub frame: Frame,
    pub placement: Placement,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Request body for POST /resize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: u32,
    pub height: u32,
}

/// Response to POST /close
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl CloseResponse {
    pub fn closing() -> Self {
        Self {
            status: "closing".to_string(),
            timestamp: Utc::now(),
        }
    }
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
