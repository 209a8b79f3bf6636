//! Utility module
//!
//! Clocks, host signals and small formatting helpers.

pub mod clock;
pub mod env_signals;
pub mod format;
pub mod signals;

// Re-export main types and functions
pub use clock::{Clock, ManualClock, SystemClock};
pub use env_signals::{EnvSignal, EnvironmentSignals, Subscription};
pub use format::format_clock;
pub use signals::{resume_signal_task, shutdown_signal};
