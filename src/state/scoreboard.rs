//! The complete in-memory scoreboard and its snapshot conversion

use chrono::{DateTime, Utc};

use super::{ScoreLedger, SessionState, Snapshot, TimerState};

/// Everything that is persisted together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub timer: TimerState,
    pub session: SessionState,
    pub scores: ScoreLedger,
    pub sound_enabled: bool,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::from_snapshot(&Snapshot::default(), Utc::now())
    }

    /// Rebuild from a stored snapshot, reconciling a running clock with `now`
    pub fn from_snapshot(snapshot: &Snapshot, now: DateTime<Utc>) -> Self {
        let end_time = snapshot.end_time.and_then(DateTime::<Utc>::from_timestamp_millis);
        Self {
            timer: TimerState::restore(snapshot.time_left, snapshot.is_running, end_time, now),
            session: SessionState::at(snapshot.quarter as i64),
            scores: ScoreLedger {
                home_score: snapshot.home_score,
                away_score: snapshot.away_score,
                home_team: snapshot.home_team.clone(),
                away_team: snapshot.away_team.clone(),
            },
            sound_enabled: snapshot.sound_enabled,
        }
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            home_score: self.scores.home_score,
            away_score: self.scores.away_score,
            home_team: self.scores.home_team.clone(),
            away_team: self.scores.away_team.clone(),
            quarter: self.session.quarter(),
            time_left: self.timer.remaining_seconds(),
            sound_enabled: self.sound_enabled,
            is_running: self.timer.is_running(),
            end_time: self.timer.end_time().map(|end| end.timestamp_millis()),
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap()
    }

    #[test]
    fn default_snapshot_gives_fresh_board() {
        let board = Scoreboard::from_snapshot(&Snapshot::default(), t0());
        assert_eq!(board.timer, TimerState::new());
        assert_eq!(board.session.quarter(), 1);
        assert_eq!(board.scores, ScoreLedger::new());
        assert!(board.sound_enabled);
        assert_eq!(board.to_snapshot(), Snapshot::default());
    }

    #[test]
    fn running_board_stores_its_end_instant() {
        let mut board = Scoreboard::new();
        board.timer.set_remaining(9);
        board.timer.start(t0());

        let snapshot = board.to_snapshot();
        assert!(snapshot.is_running);
        assert_eq!(snapshot.time_left, 9);
        assert_eq!(
            snapshot.end_time,
            Some((t0() + Duration::seconds(9)).timestamp_millis())
        );
    }

    #[test]
    fn running_snapshot_is_reconciled_after_a_gap() {
        let saved = Snapshot {
            time_left: 9,
            is_running: true,
            end_time: Some((t0() + Duration::milliseconds(9_000)).timestamp_millis()),
            ..Snapshot::default()
        };
        let board = Scoreboard::from_snapshot(&saved, t0() + Duration::milliseconds(5_000));
        assert!(board.timer.is_running());
        assert_eq!(board.timer.remaining_seconds(), 4);
    }

    #[test]
    fn expired_snapshot_loads_paused_at_zero() {
        let saved = Snapshot {
            time_left: 30,
            is_running: true,
            end_time: Some(t0().timestamp_millis()),
            ..Snapshot::default()
        };
        let board = Scoreboard::from_snapshot(&saved, t0() + Duration::minutes(10));
        assert!(!board.timer.is_running());
        assert_eq!(board.timer.remaining_seconds(), 0);
        assert_eq!(board.to_snapshot().end_time, None);
    }
}
