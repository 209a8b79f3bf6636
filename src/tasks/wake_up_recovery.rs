//! Host wake-up detection

use std::time::{Duration, Instant};
use chrono::Utc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::utils::{EnvSignal, EnvironmentSignals};

/// Wall-clock time that must go missing from the monotonic clock before
/// the host is considered to have slept
const SLEEP_THRESHOLD: Duration = Duration::from_secs(2);

/// Background task that notices the host sleeping and signals the
/// scoreboard to reconcile once it is awake again
pub async fn wake_up_recovery_task(hub: EnvironmentSignals, check_every: Duration) {
    info!("Starting wake-up recovery task");

    let mut interval = interval(check_every);
    let mut last_mono = Instant::now();
    let mut last_wall = Utc::now();

    loop {
        interval.tick().await;

        let mono_now = Instant::now();
        let wall_now = Utc::now();
        let mono_elapsed = mono_now.duration_since(last_mono);
        let wall_elapsed = (wall_now - last_wall).to_std().unwrap_or_default();
        last_mono = mono_now;
        last_wall = wall_now;

        if host_slept(mono_elapsed, wall_elapsed) {
            info!(
                "System wake-up detected ({:?} unaccounted for), triggering reconcile",
                wall_elapsed.saturating_sub(mono_elapsed)
            );
            hub.emit(EnvSignal::BecameVisible);
        } else {
            debug!("No suspension since last check");
        }
    }
}

/// The monotonic clock stands still while the host sleeps; the wall clock
/// does not
pub fn host_slept(mono_elapsed: Duration, wall_elapsed: Duration) -> bool {
    wall_elapsed.saturating_sub(mono_elapsed) > SLEEP_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_missing_wall_clock_time() {
        let secs = Duration::from_secs;
        assert!(!host_slept(secs(15), secs(15)));
        assert!(!host_slept(secs(15), secs(16)));
        assert!(host_slept(secs(15), secs(600)));
        // Wall clock stepped backwards
        assert!(!host_slept(secs(15), secs(0)));
    }
}
