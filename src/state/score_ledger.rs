//! Scores and team names

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOME_TEAM: &str = "Home";
pub const DEFAULT_AWAY_TEAM: &str = "Away";

/// Which team an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// Two independent non-negative counters plus the team names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLedger {
    pub home_score: u32,
    pub away_score: u32,
    pub home_team: String,
    pub away_team: String,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self {
            home_score: 0,
            away_score: 0,
            home_team: DEFAULT_HOME_TEAM.to_string(),
            away_team: DEFAULT_AWAY_TEAM.to_string(),
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }

    fn score_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Home => &mut self.home_score,
            Side::Away => &mut self.away_score,
        }
    }

    pub fn increment(&mut self, side: Side) -> u32 {
        let score = self.score_mut(side);
        *score = score.saturating_add(1);
        *score
    }

    /// Decrease by one, never below zero
    pub fn decrement(&mut self, side: Side) -> u32 {
        let score = self.score_mut(side);
        *score = score.saturating_sub(1);
        *score
    }

    /// Direct entry from free text; anything unusable becomes 0
    pub fn set(&mut self, side: Side, raw: &str) -> u32 {
        let value = coerce_score(raw);
        *self.score_mut(side) = value;
        value
    }

    pub fn set_team_name(&mut self, side: Side, name: &str) {
        let name = name.to_string();
        match side {
            Side::Home => self.home_team = name,
            Side::Away => self.away_team = name,
        }
    }

    pub fn reset_scores(&mut self) {
        self.home_score = 0;
        self.away_score = 0;
    }
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a score entry. Non-numeric and negative input coerce to 0,
/// fractional input keeps its whole part.
pub fn coerce_score(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return value.clamp(0, u32::MAX as i64) as u32;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}
