//! Whole-snapshot save and load
//!
//! Persistence is best-effort: write failures are logged and dropped, and
//! anything unreadable at load time is treated as a first run.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::store::DurableStore;
use crate::state::{Scoreboard, Snapshot};

/// Fixed key the scoreboard is stored under
pub const STORAGE_KEY: &str = "courtside-scoreboard";

/// Result of reading the stored scoreboard
#[derive(Debug, Clone)]
pub struct Loaded {
    pub board: Scoreboard,
    /// The snapshot claimed a running clock whose end instant had passed
    pub expired_while_away: bool,
}

#[derive(Clone)]
pub struct PersistenceCodec {
    store: Arc<dyn DurableStore>,
    key: String,
}

impl PersistenceCodec {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn DurableStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// Replace the stored document with `snapshot`
    pub fn save(&self, snapshot: &Snapshot) {
        let blob = match snapshot.encode() {
            Ok(blob) => blob,
            Err(e) => {
                warn!("Failed to encode scoreboard snapshot: {}", e);
                return;
            }
        };
        match self.store.set(&self.key, &blob) {
            Ok(()) => debug!("Saved scoreboard snapshot"),
            Err(e) => warn!("Failed to save scoreboard snapshot: {}", e),
        }
    }

    /// Read the stored document and rebuild the scoreboard as of `now`
    pub fn load(&self, now: DateTime<Utc>) -> Loaded {
        let snapshot = self.read_snapshot().unwrap_or_default();
        let board = Scoreboard::from_snapshot(&snapshot, now);
        let expired_while_away = snapshot.is_running && !board.timer.is_running();

        if expired_while_away {
            info!("Saved clock expired while the scoreboard was not running");
        } else if board.timer.is_running() {
            info!(
                "Resuming running clock with {}s remaining",
                board.timer.remaining_seconds()
            );
        }

        Loaded {
            board,
            expired_while_away,
        }
    }

    fn read_snapshot(&self) -> Option<Snapshot> {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                info!("No saved scoreboard found, starting fresh");
                return None;
            }
            Err(e) => {
                warn!("Failed to read saved scoreboard, starting fresh: {}", e);
                return None;
            }
        };

        match Snapshot::decode(&blob) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Discarding unreadable saved scoreboard: {}", e);
                None
            }
        }
    }
}
