#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use chrono::{DateTime, TimeZone, Utc};

use courtside::{
    services::{Alert, MemoryStore},
    state::{AppState, AppStateOptions},
    utils::ManualClock,
};

#[derive(Default)]
pub struct CountingAlert(AtomicUsize);

impl CountingAlert {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Alert for CountingAlert {
    fn play(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub state: Arc<AppState>,
    pub store: Arc<MemoryStore>,
    pub alert: Arc<CountingAlert>,
    pub clock: Arc<ManualClock>,
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap()
}

pub fn harness(tick_interval: Duration) -> Harness {
    harness_on(Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(t0())), tick_interval)
}

/// Build a fresh state over an existing store and clock, as a restart would
pub fn harness_on(
    store: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
    tick_interval: Duration,
) -> Harness {
    let alert = Arc::new(CountingAlert::default());
    let state = AppState::new(
        store.clone(),
        alert.clone(),
        clock.clone(),
        AppStateOptions { tick_interval },
    );
    Harness {
        state,
        store,
        alert,
        clock,
    }
}

/// Poll `check` until it holds or roughly two seconds pass
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
