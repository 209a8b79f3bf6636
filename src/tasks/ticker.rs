//! Periodic display refresh while the clock runs
//!
//! The ticker only keeps the visible countdown fresh. Correctness never
//! depends on it firing: every recompute derives the time from the clock's
//! end instant.

use std::{sync::Weak, time::Duration};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, error, warn};

use crate::state::{AppState, Recompute};

/// Default refresh period
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Owner of the repeating recompute task. At most one task is alive per
/// ticker; starting again replaces it and dropping the ticker cancels it.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// True while a tick task is scheduled
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Spawn the tick task for `state`, cancelling any previous one
    pub fn start(&mut self, state: Weak<AppState>) {
        self.stop();

        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime available, clock display will only refresh on demand");
            return;
        };

        let period = self.period;
        let handle = runtime.spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;

                let Some(state) = state.upgrade() else {
                    break;
                };
                match state.recompute() {
                    Ok(Recompute::Running { .. }) => {}
                    Ok(Recompute::Expired) | Ok(Recompute::Idle) => break,
                    Err(e) => {
                        error!("Tick failed to recompute clock: {}", e);
                        break;
                    }
                }
            }
            debug!("Ticker stopped");
        });

        debug!("Ticker started with period {:?}", period);
        self.handle = Some(handle);
    }

    /// Cancel the tick task, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
