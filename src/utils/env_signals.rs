//! Host attention signals
//!
//! Sources that learn the host is active again (a viewer tab becoming
//! visible, a window gaining focus, the machine waking up) emit into the
//! hub; subscribers receive every signal emitted while they are subscribed.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvSignal {
    BecameVisible,
    FocusGained,
}

/// Broadcast hub for [`EnvSignal`]s
#[derive(Debug, Clone)]
pub struct EnvironmentSignals {
    tx: broadcast::Sender<EnvSignal>,
}

impl EnvironmentSignals {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Deliver `signal` to all current subscribers, returning how many
    pub fn emit(&self, signal: EnvSignal) -> usize {
        match self.tx.send(signal) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!("No subscribers for {:?}", signal);
                0
            }
        }
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EnvironmentSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// A live registration with the hub. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<EnvSignal>,
}

impl Subscription {
    /// Wait for the next signal. Returns `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<EnvSignal> {
        match self.rx.recv().await {
            Ok(signal) => Some(signal),
            // Missed signals all mean "recompute now", so one stands in for the lot
            Err(RecvError::Lagged(skipped)) => {
                debug!("Subscriber lagged, skipped {} signals", skipped);
                Some(EnvSignal::BecameVisible)
            }
            Err(RecvError::Closed) => None,
        }
    }

    /// Release the registration with the hub
    pub fn unsubscribe(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_emitted_signals() {
        let hub = EnvironmentSignals::new();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        assert_eq!(hub.emit(EnvSignal::FocusGained), 2);
        assert_eq!(first.recv().await, Some(EnvSignal::FocusGained));
        assert_eq!(second.recv().await, Some(EnvSignal::FocusGained));
    }

    #[tokio::test]
    async fn unsubscribing_releases_the_registration() {
        let hub = EnvironmentSignals::new();
        let subscription = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);

        subscription.unsubscribe();
        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(hub.emit(EnvSignal::BecameVisible), 0);
    }

    #[tokio::test]
    async fn closed_hub_ends_the_subscription() {
        let hub = EnvironmentSignals::new();
        let mut subscription = hub.subscribe();
        drop(hub);
        assert_eq!(subscription.recv().await, None);
    }
}
