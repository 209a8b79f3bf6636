//! Persisted snapshot shape
//!
//! The whole scoreboard is stored as one JSON document:
//!
//! ```json
//! { "homeScore": 0, "awayScore": 0, "homeTeam": "Home", "awayTeam": "Away",
//!   "quarter": 1, "timeLeft": 900, "soundEnabled": true,
//!   "isRunning": false, "endTime": null }
//! ```
//!
//! `endTime` is epoch milliseconds. There is no version field; documents are
//! replaced whole on every save.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::{
    score_ledger::{DEFAULT_AWAY_TEAM, DEFAULT_HOME_TEAM},
    session_state::QUARTERS,
    timer_state::QUARTER_SECONDS,
};

/// A document that cannot be used at all
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("snapshot is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub home_score: u32,
    pub away_score: u32,
    pub home_team: String,
    pub away_team: String,
    pub quarter: u8,
    pub time_left: u64,
    pub sound_enabled: bool,
    pub is_running: bool,
    pub end_time: Option<i64>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            home_score: 0,
            away_score: 0,
            home_team: DEFAULT_HOME_TEAM.to_string(),
            away_team: DEFAULT_AWAY_TEAM.to_string(),
            quarter: 1,
            time_left: QUARTER_SECONDS,
            sound_enabled: true,
            is_running: false,
            end_time: None,
        }
    }
}

impl Snapshot {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a stored document.
    ///
    /// Fails only when the blob is not a JSON object. Inside an object every
    /// field is read on its own; a missing or mistyped field takes its
    /// default and out-of-range numbers are clamped.
    pub fn decode(blob: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(blob)?;
        let Value::Object(fields) = value else {
            return Err(SnapshotError::NotAnObject);
        };

        let defaults = Self::default();
        Ok(Self {
            home_score: int_field(&fields, "homeScore")
                .map(|n| n.clamp(0, u32::MAX as i64) as u32)
                .unwrap_or(defaults.home_score),
            away_score: int_field(&fields, "awayScore")
                .map(|n| n.clamp(0, u32::MAX as i64) as u32)
                .unwrap_or(defaults.away_score),
            home_team: str_field(&fields, "homeTeam").unwrap_or(defaults.home_team),
            away_team: str_field(&fields, "awayTeam").unwrap_or(defaults.away_team),
            quarter: int_field(&fields, "quarter")
                .map(|n| n.clamp(1, QUARTERS as i64) as u8)
                .unwrap_or(defaults.quarter),
            time_left: int_field(&fields, "timeLeft")
                .map(|n| n.max(0) as u64)
                .unwrap_or(defaults.time_left),
            sound_enabled: bool_field(&fields, "soundEnabled").unwrap_or(defaults.sound_enabled),
            is_running: bool_field(&fields, "isRunning").unwrap_or(defaults.is_running),
            end_time: int_field(&fields, "endTime"),
        })
    }
}

fn int_field(fields: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = fields.get(key)?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
    })
}

fn str_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key)?.as_str().map(str::to_string)
}

fn bool_field(fields: &Map<String, Value>, key: &str) -> Option<bool> {
    fields.get(key)?.as_bool()
}
