//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{state::Snapshot, utils::format_clock};

/// Response for every action endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: String,
    pub scoreboard: Snapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, scoreboard: Snapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display: format_clock(scoreboard.time_left),
            scoreboard,
        }
    }

    /// The action was applied
    pub fn ok(message: String, scoreboard: Snapshot) -> Self {
        Self::new("ok".to_string(), message, scoreboard)
    }

    /// The action does not apply in the current state
    pub fn rejected(message: String, scoreboard: Snapshot) -> Self {
        Self::new("rejected".to_string(), message, scoreboard)
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub scoreboard: Snapshot,
    pub display: String,
    pub final_quarter: bool,
    pub uptime: String,
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

#[derive(Debug, Clone, Deserialize)]
pub struct SetRemainingRequest {
    pub seconds: i64,
}

/// Direct score entry. Numbers and numeric strings are accepted; anything
/// else counts as 0.
#[derive(Debug, Clone, Deserialize)]
pub struct SetScoreRequest {
    pub value: Value,
}

impl SetScoreRequest {
    pub fn raw(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamNameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoundRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisibilityRequest {
    pub visible: bool,
}
