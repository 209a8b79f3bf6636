//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod ticker;
pub mod visibility_reconciler;
pub mod wake_up_recovery;

// Re-export main types and functions
pub use ticker::{Ticker, TICK_INTERVAL};
pub use visibility_reconciler::VisibilityReconciler;
pub use wake_up_recovery::{host_slept, wake_up_recovery_task};
