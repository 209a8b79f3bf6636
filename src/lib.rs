//! Courtside - a match clock and scoreboard that survives sleep and restarts
//!
//! The clock is anchored to an absolute end instant rather than a tick
//! counter, so the remaining time stays correct across suspended timers,
//! host sleep and process restarts. The whole scoreboard is written through
//! to a durable store after every change and reconciled on load.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, AppStateOptions};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
