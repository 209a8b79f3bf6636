//! Quarter tracking

/// Number of quarters in a match
pub const QUARTERS: u8 = 4;

/// Current quarter of the match, always within `1..=QUARTERS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    quarter: u8,
}

impl SessionState {
    pub fn new() -> Self {
        Self { quarter: 1 }
    }

    /// Build from a persisted value, clamping it into range
    pub fn at(quarter: i64) -> Self {
        Self {
            quarter: quarter.clamp(1, QUARTERS as i64) as u8,
        }
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    pub fn is_final_quarter(&self) -> bool {
        self.quarter == QUARTERS
    }

    /// Move to the next quarter. Returns false in the final quarter.
    pub fn advance(&mut self) -> bool {
        if self.is_final_quarter() {
            return false;
        }
        self.quarter += 1;
        true
    }

    pub fn reset(&mut self) {
        self.quarter = 1;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
