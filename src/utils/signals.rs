//! Process signal handling

use signal_hook::consts::{SIGCONT, SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{error, info};

use super::env_signals::{EnvSignal, EnvironmentSignals};

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([SIGTERM, SIGINT]) {
        Ok(signals) => signals,
        Err(e) => {
            error!("Failed to create signal handler, falling back to ctrl-c: {}", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for ctrl-c: {}", e);
            }
            return;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}

/// Treat SIGCONT (the process was stopped and resumed) as the host
/// becoming visible again
pub async fn resume_signal_task(hub: EnvironmentSignals) {
    let mut signals = match Signals::new([SIGCONT]) {
        Ok(signals) => signals,
        Err(e) => {
            error!("Failed to listen for SIGCONT: {}", e);
            return;
        }
    };

    while signals.next().await.is_some() {
        info!("Process resumed, reconciling clock");
        hub.emit(EnvSignal::BecameVisible);
    }
}
