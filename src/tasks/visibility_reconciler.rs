//! Recompute the clock whenever the host regains attention
//!
//! Periodic ticks may have been suspended for exactly as long as the host
//! was away, so visibility and focus signals trigger an immediate
//! recompute of their own.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// A running subscription of the scoreboard to its environment signals.
/// Dropping the reconciler cancels the task and releases the subscription.
#[derive(Debug)]
pub struct VisibilityReconciler {
    handle: JoinHandle<()>,
}

impl VisibilityReconciler {
    /// Subscribe to `state`'s signal hub and start reacting to it
    pub fn spawn(state: &Arc<AppState>) -> Self {
        // Subscribe before spawning so no signal emitted from here on is missed
        let mut subscription = state.signals().subscribe();
        let state = Arc::downgrade(state);

        let handle = tokio::spawn(async move {
            info!("Starting visibility reconciler");

            while let Some(signal) = subscription.recv().await {
                let Some(state) = state.upgrade() else {
                    break;
                };
                debug!("Received environment signal: {:?}", signal);
                if let Err(e) = state.on_environment_signal(signal) {
                    warn!("Failed to reconcile clock after {:?}: {}", signal, e);
                }
            }

            debug!("Visibility reconciler stopped");
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop reacting to signals
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for VisibilityReconciler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
