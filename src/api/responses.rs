//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::ZoneSnapshot;

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub zone: ZoneSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, zone: ZoneSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            zone,
        }
    }

    /// Create a response for an applied command
    pub fn ok(message: impl Into<String>, zone: ZoneSnapshot) -> Self {
        Self::new("ok".to_string(), message.into(), zone)
    }
}

/// Status response with the full zone snapshot and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub zone: ZoneSnapshot,
    pub tick_period_ms: u64,
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

/// Query parameters for POST /breathing/restart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestartParams {
    /// Overrides the configured restart length
    pub seconds: Option<u64>,
}
