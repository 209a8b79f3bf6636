//! Match clock state and the wall-clock recomputation rule
//!
//! The clock never counts ticks. While running it only remembers the
//! absolute instant at which it reaches zero, and every observation derives
//! the remaining seconds from that instant. A single recompute after an
//! arbitrarily long suspension is therefore as correct as a thousand.

use chrono::{DateTime, Duration, Utc};

/// Length of one quarter in seconds (15 minutes)
pub const QUARTER_SECONDS: u64 = 15 * 60;

/// Largest settable remaining time, the most `MM:SS` can show
pub const MAX_SECONDS: u64 = 99 * 60 + 59;

/// Outcome of a recompute, reported to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// The clock is not running; nothing changed
    Idle,
    /// Still running with this many whole seconds left
    Running { remaining_seconds: u64 },
    /// This call observed the clock reaching zero
    Expired,
}

/// Authoritative countdown state
///
/// Invariant: `running == end_time.is_some()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    remaining_seconds: u64,
    running: bool,
    end_time: Option<DateTime<Utc>>,
}

impl TimerState {
    /// Create a paused clock holding a full quarter
    pub fn new() -> Self {
        Self::paused(QUARTER_SECONDS)
    }

    /// Create a paused clock holding `remaining_seconds`
    pub fn paused(remaining_seconds: u64) -> Self {
        Self {
            remaining_seconds: remaining_seconds.min(MAX_SECONDS),
            running: false,
            end_time: None,
        }
    }

    /// Rebuild a clock from persisted fields, reconciling against `now`.
    ///
    /// A clock saved mid-run resumes only if its end instant is still in
    /// the future. An already expired clock comes back paused at zero and
    /// does not count as an expiry event. An end instant further away than
    /// `MAX_SECONDS` is not a clock this program wrote; it is dropped and
    /// the saved remaining time is used instead.
    pub fn restore(
        time_left: u64,
        was_running: bool,
        end_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        match (was_running, end_time) {
            (true, Some(end)) => {
                let remaining = remaining_until(end, now);
                if remaining > MAX_SECONDS {
                    Self::paused(time_left)
                } else if remaining > 0 {
                    Self {
                        remaining_seconds: remaining,
                        running: true,
                        end_time: Some(end),
                    }
                } else {
                    Self::paused(0)
                }
            }
            _ => Self::paused(time_left),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Anchor the countdown at `now + remaining`. Returns false if the
    /// clock was already running, or if the end instant is not
    /// representable, in which case nothing changes.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.running {
            return false;
        }
        let Some(end) = Duration::try_seconds(self.remaining_seconds as i64)
            .and_then(|remaining| now.checked_add_signed(remaining))
        else {
            return false;
        };
        self.end_time = Some(end);
        self.running = true;
        true
    }

    /// Freeze the remaining time as of `now`. Returns false if the clock
    /// was not running.
    pub fn pause(&mut self, now: DateTime<Utc>) -> bool {
        let Some(end) = self.end_time.filter(|_| self.running) else {
            return false;
        };
        self.remaining_seconds = remaining_until(end, now);
        self.running = false;
        self.end_time = None;
        true
    }

    /// Stop the clock and load a fresh quarter
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Manual edit of the remaining time; only meaningful while paused
    pub fn set_remaining(&mut self, seconds: i64) {
        self.remaining_seconds = seconds.clamp(0, MAX_SECONDS as i64) as u64;
    }

    /// Re-derive the remaining time from the end instant.
    ///
    /// Calling this any number of times with the same `now` yields the same
    /// state. `Expired` is reported only by the call that performs the
    /// transition, since the clock is no longer running afterwards.
    pub fn recompute(&mut self, now: DateTime<Utc>) -> Recompute {
        let Some(end) = self.end_time.filter(|_| self.running) else {
            return Recompute::Idle;
        };

        let remaining = remaining_until(end, now);
        self.remaining_seconds = remaining;

        if remaining == 0 {
            self.running = false;
            self.end_time = None;
            Recompute::Expired
        } else {
            Recompute::Running {
                remaining_seconds: remaining,
            }
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole seconds left until `end`, rounded up and floored at zero
pub fn remaining_until(end: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let delta = end.signed_duration_since(now);
    if delta <= Duration::zero() {
        return 0;
    }
    let whole = delta.num_seconds();
    if delta > Duration::seconds(whole) {
        (whole + 1) as u64
    } else {
        whole as u64
    }
}
