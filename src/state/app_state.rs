//! Main application state management
//!
//! `AppState` is the single owner of the scoreboard. Every mutation goes
//! through one of its named operations, which take the board lock, apply
//! the change against the injected clock, write the whole snapshot through
//! to the store and start or stop the ticker to match the clock.

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{Recompute, Scoreboard, Side, Snapshot};
use crate::{
    services::{Alert, DurableStore, PersistenceCodec},
    tasks::{Ticker, TICK_INTERVAL},
    utils::{Clock, EnvSignal, EnvironmentSignals},
};

/// Tunables for [`AppState`]
#[derive(Debug, Clone)]
pub struct AppStateOptions {
    /// How often the display is refreshed while the clock runs
    pub tick_interval: Duration,
}

impl Default for AppStateOptions {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
        }
    }
}

/// Main application state: the scoreboard plus its collaborators
pub struct AppState {
    board: Mutex<Scoreboard>,
    codec: PersistenceCodec,
    alert: Arc<dyn Alert>,
    clock: Arc<dyn Clock>,
    ticker: Mutex<Ticker>,
    signals: EnvironmentSignals,
    /// Server metadata
    pub start_time: Instant,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
    me: Weak<AppState>,
}

impl AppState {
    /// Load the saved scoreboard (or defaults) and resume a running clock
    pub fn new(
        store: Arc<dyn DurableStore>,
        alert: Arc<dyn Alert>,
        clock: Arc<dyn Clock>,
        options: AppStateOptions,
    ) -> Arc<Self> {
        let codec = PersistenceCodec::new(store);
        let loaded = codec.load(clock.now());
        if loaded.expired_while_away {
            // The stored document still claims a running clock
            codec.save(&loaded.board.to_snapshot());
        }
        let running = loaded.board.timer.is_running();

        let state = Arc::new_cyclic(|me| Self {
            board: Mutex::new(loaded.board),
            codec,
            alert,
            clock,
            ticker: Mutex::new(Ticker::new(options.tick_interval)),
            signals: EnvironmentSignals::new(),
            start_time: Instant::now(),
            last_action: Mutex::new(None),
            me: me.clone(),
        });

        if running {
            if let Ok(mut ticker) = state.ticker.lock() {
                ticker.start(state.me.clone());
            }
        }
        state
    }

    /// Hub that environment signal sources emit into
    pub fn signals(&self) -> &EnvironmentSignals {
        &self.signals
    }

    fn lock_board(&self) -> Result<MutexGuard<'_, Scoreboard>, String> {
        self.board
            .lock()
            .map_err(|e| format!("Failed to lock scoreboard: {}", e))
    }

    /// Apply a user action, persist the result and keep the ticker in step
    fn update<R, F>(&self, action: &str, updater: F) -> Result<(R, Snapshot), String>
    where
        F: FnOnce(&mut Scoreboard, DateTime<Utc>) -> R,
    {
        self.update_reconciled(action, |board, now, _| updater(board, now))
    }

    /// Like `update`, but the updater also sees the outcome of the
    /// recompute that runs before every action
    fn update_reconciled<R, F>(&self, action: &str, updater: F) -> Result<(R, Snapshot), String>
    where
        F: FnOnce(&mut Scoreboard, DateTime<Utc>, Recompute) -> R,
    {
        let mut board = self.lock_board()?;
        let now = self.clock.now();

        let outcome = board.timer.recompute(now);
        if outcome == Recompute::Expired {
            self.on_expired(&board);
        }

        let result = updater(&mut *board, now, outcome);
        let snapshot = board.to_snapshot();
        self.codec.save(&snapshot);
        self.sync_ticker(board.timer.is_running())?;
        drop(board); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), now));
        }
        debug!("Applied action: {}", action);

        Ok((result, snapshot))
    }

    /// Side effects of the one recompute that observed expiry
    fn on_expired(&self, board: &Scoreboard) {
        info!("Quarter {} clock expired", board.session.quarter());
        if board.sound_enabled {
            self.alert.play();
        }
    }

    /// One active tick task while running, none otherwise
    fn sync_ticker(&self, running: bool) -> Result<(), String> {
        let mut ticker = self
            .ticker
            .lock()
            .map_err(|e| format!("Failed to lock ticker: {}", e))?;
        if running {
            if !ticker.is_active() {
                ticker.start(self.me.clone());
            }
        } else {
            ticker.stop();
        }
        Ok(())
    }

    /// Re-derive the remaining time from the clock's end instant.
    ///
    /// Shared by the ticker, the visibility reconciler and status reads.
    /// The alert is played by the one call that observes expiry.
    pub fn recompute(&self) -> Result<Recompute, String> {
        let mut board = self.lock_board()?;
        let before = board.timer.remaining_seconds();
        let outcome = board.timer.recompute(self.clock.now());

        match outcome {
            Recompute::Idle => {}
            Recompute::Running { remaining_seconds } => {
                if remaining_seconds != before {
                    self.codec.save(&board.to_snapshot());
                }
            }
            Recompute::Expired => {
                self.on_expired(&board);
                self.codec.save(&board.to_snapshot());
                self.sync_ticker(false)?;
            }
        }
        Ok(outcome)
    }

    /// Reconcile after the host regained attention
    pub fn on_environment_signal(&self, signal: EnvSignal) -> Result<Recompute, String> {
        let running = self.lock_board()?.timer.is_running();
        if !running {
            debug!("Ignoring {:?}, clock is not running", signal);
            return Ok(Recompute::Idle);
        }
        info!("Reconciling clock after {:?}", signal);
        self.recompute()
    }

    /// Start the clock. Returns false if it was already running, including
    /// when it ran out just before this call.
    pub fn start_timer(&self) -> Result<(bool, Snapshot), String> {
        let (started, snapshot) = self.update_reconciled("start", |board, now, outcome| {
            outcome != Recompute::Expired && board.timer.start(now)
        })?;
        if started {
            info!("Clock started with {}s remaining", snapshot.time_left);
        }
        Ok((started, snapshot))
    }

    /// Pause the clock. Returns false if it was not running.
    pub fn pause_timer(&self) -> Result<(bool, Snapshot), String> {
        let (paused, snapshot) = self.update("pause", |board, now| board.timer.pause(now))?;
        if paused {
            info!("Clock paused with {}s remaining", snapshot.time_left);
        }
        Ok((paused, snapshot))
    }

    /// Start if paused, pause if running
    pub fn toggle_timer(&self) -> Result<Snapshot, String> {
        let (_, snapshot) = self.update_reconciled("toggle", |board, now, outcome| {
            if outcome == Recompute::Expired {
                // The press landed after the clock ran out; it stays stopped
                return;
            }
            if board.timer.is_running() {
                board.timer.pause(now);
            } else {
                board.timer.start(now);
            }
        })?;
        info!("Clock toggled, running={}", snapshot.is_running);
        Ok(snapshot)
    }

    pub fn reset_timer(&self) -> Result<Snapshot, String> {
        info!("Resetting clock");
        self.update("reset", |board, _| board.timer.reset())
            .map(|(_, snapshot)| snapshot)
    }

    /// Manually set the remaining time. Refused while the clock runs.
    pub fn set_remaining(&self, seconds: i64) -> Result<(bool, Snapshot), String> {
        self.update("set-remaining", |board, _| {
            if board.timer.is_running() {
                return false;
            }
            board.timer.set_remaining(seconds);
            true
        })
    }

    /// Move to the next quarter with a fresh clock. Returns false in the
    /// final quarter, where nothing changes.
    pub fn advance_quarter(&self) -> Result<(bool, Snapshot), String> {
        let (advanced, snapshot) = self.update("next-quarter", |board, _| {
            if !board.session.advance() {
                return false;
            }
            board.timer.reset();
            true
        })?;
        if advanced {
            info!("Advanced to quarter {}", snapshot.quarter);
        }
        Ok((advanced, snapshot))
    }

    /// Back to the first quarter with a fresh clock
    pub fn reset_session(&self) -> Result<Snapshot, String> {
        info!("Resetting session to quarter 1");
        self.update("reset-session", |board, _| {
            board.session.reset();
            board.timer.reset();
        })
        .map(|(_, snapshot)| snapshot)
    }

    pub fn increment_score(&self, side: Side) -> Result<Snapshot, String> {
        self.update("score-increment", |board, _| board.scores.increment(side))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn decrement_score(&self, side: Side) -> Result<Snapshot, String> {
        self.update("score-decrement", |board, _| board.scores.decrement(side))
            .map(|(_, snapshot)| snapshot)
    }

    /// Direct score entry; unusable input becomes 0
    pub fn set_score(&self, side: Side, raw: &str) -> Result<Snapshot, String> {
        self.update("score-set", |board, _| board.scores.set(side, raw))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn set_team_name(&self, side: Side, name: &str) -> Result<Snapshot, String> {
        self.update("team-name", |board, _| board.scores.set_team_name(side, name))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn reset_scores(&self) -> Result<Snapshot, String> {
        info!("Resetting scores");
        self.update("reset-scores", |board, _| board.scores.reset_scores())
            .map(|(_, snapshot)| snapshot)
    }

    pub fn set_sound_enabled(&self, enabled: bool) -> Result<Snapshot, String> {
        info!("Setting sound enabled to: {}", enabled);
        self.update("sound", |board, _| board.sound_enabled = enabled)
            .map(|(_, snapshot)| snapshot)
    }

    /// Current snapshot, recomputed against the clock first
    pub fn snapshot(&self) -> Result<Snapshot, String> {
        self.recompute()?;
        Ok(self.lock_board()?.to_snapshot())
    }

    /// Whether the clock is counting down
    pub fn is_running(&self) -> Result<bool, String> {
        Ok(self.lock_board()?.timer.is_running())
    }

    /// Whether a tick task is currently scheduled
    pub fn ticker_active(&self) -> bool {
        self.ticker
            .lock()
            .map(|ticker| ticker.is_active())
            .unwrap_or(false)
    }

    /// Cancel the ticker before the state is torn down
    pub fn shutdown(&self) {
        if let Ok(mut ticker) = self.ticker.lock() {
            ticker.stop();
        }
        info!("Scoreboard shut down");
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }
}
