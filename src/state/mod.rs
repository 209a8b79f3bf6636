//! State management module
//!
//! This module contains the scoreboard model and the controller that owns it.

pub mod app_state;
pub mod score_ledger;
pub mod scoreboard;
pub mod session_state;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, AppStateOptions};
pub use score_ledger::{ScoreLedger, Side};
pub use scoreboard::Scoreboard;
pub use session_state::{SessionState, QUARTERS};
pub use snapshot::{Snapshot, SnapshotError};
pub use timer_state::{Recompute, TimerState, MAX_SECONDS, QUARTER_SECONDS};
