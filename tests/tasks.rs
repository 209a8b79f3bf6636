mod common;

use std::time::Duration;
use chrono::Duration as ChronoDuration;

use common::{eventually, harness, harness_on};
use courtside::{
    tasks::VisibilityReconciler,
    utils::EnvSignal,
};

const FAST_TICK: Duration = Duration::from_millis(10);
const SLOW_TICK: Duration = Duration::from_secs(3600);

#[tokio::test]
async fn ticker_runs_only_while_the_clock_runs() {
    let h = harness(FAST_TICK);
    assert!(!h.state.ticker_active());

    h.state.start_timer().unwrap();
    assert!(h.state.ticker_active());

    h.state.pause_timer().unwrap();
    assert!(!h.state.ticker_active());

    h.state.toggle_timer().unwrap();
    assert!(h.state.ticker_active());

    h.state.reset_timer().unwrap();
    assert!(!h.state.ticker_active());
}

#[tokio::test]
async fn ticker_notices_expiry_and_alerts_once() {
    let h = harness(FAST_TICK);
    h.state.set_remaining(2).unwrap();
    h.state.start_timer().unwrap();

    h.clock.advance(ChronoDuration::seconds(3));
    assert!(eventually(|| !h.state.is_running().unwrap()).await);
    assert!(eventually(|| !h.state.ticker_active()).await);

    // Give any stray tick a chance to fire
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(h.alert.count(), 1);
    assert_eq!(h.state.snapshot().unwrap().time_left, 0);
}

#[tokio::test]
async fn ticker_keeps_display_fresh() {
    let h = harness(FAST_TICK);
    h.state.start_timer().unwrap();
    h.clock.advance(ChronoDuration::milliseconds(61_500));

    let store = h.store.clone();
    assert!(
        eventually(|| {
            use courtside::services::{DurableStore, STORAGE_KEY};
            store
                .get(STORAGE_KEY)
                .unwrap()
                .is_some_and(|blob| blob.contains(r#""timeLeft":839"#))
        })
        .await
    );
}

#[tokio::test]
async fn visibility_signal_reconciles_without_ticks() {
    let h = harness(SLOW_TICK);
    let _reconciler = VisibilityReconciler::spawn(&h.state);

    h.state.set_remaining(30).unwrap();
    h.state.start_timer().unwrap();
    h.clock.advance(ChronoDuration::minutes(5));

    assert_eq!(h.state.signals().emit(EnvSignal::BecameVisible), 1);
    assert!(eventually(|| !h.state.is_running().unwrap()).await);
    assert_eq!(h.alert.count(), 1);

    // Redundant signals after expiry do nothing
    h.state.signals().emit(EnvSignal::FocusGained);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(h.alert.count(), 1);
}

#[tokio::test]
async fn focus_signal_refreshes_remaining_time() {
    let h = harness(SLOW_TICK);
    let _reconciler = VisibilityReconciler::spawn(&h.state);

    h.state.start_timer().unwrap();
    h.clock.advance(ChronoDuration::milliseconds(200_200));
    h.state.signals().emit(EnvSignal::FocusGained);

    let store = h.store.clone();
    assert!(
        eventually(|| {
            use courtside::services::{DurableStore, STORAGE_KEY};
            store
                .get(STORAGE_KEY)
                .unwrap()
                .is_some_and(|blob| blob.contains(r#""timeLeft":700"#))
        })
        .await
    );
    assert!(h.state.is_running().unwrap());
}

#[tokio::test]
async fn dropping_the_reconciler_unsubscribes() {
    let h = harness(SLOW_TICK);
    let reconciler = VisibilityReconciler::spawn(&h.state);
    assert_eq!(h.state.signals().subscriber_count(), 1);
    assert!(reconciler.is_running());

    reconciler.shutdown();
    assert!(eventually(|| h.state.signals().subscriber_count() == 0).await);
}

#[tokio::test]
async fn restart_resumes_a_running_clock() {
    let first = harness(FAST_TICK);
    first.state.set_remaining(9).unwrap();
    first.state.start_timer().unwrap();
    first.state.shutdown();

    first.clock.advance(ChronoDuration::milliseconds(5_000));
    let second = harness_on(first.store.clone(), first.clock.clone(), FAST_TICK);

    let snapshot = second.state.snapshot().unwrap();
    assert!(snapshot.is_running);
    assert_eq!(snapshot.time_left, 4);
    assert!(second.state.ticker_active());
}

#[tokio::test]
async fn restart_after_expiry_stays_quiet() {
    let first = harness(FAST_TICK);
    first.state.set_remaining(9).unwrap();
    first.state.start_timer().unwrap();
    first.state.shutdown();

    first.clock.advance(ChronoDuration::minutes(20));
    let second = harness_on(first.store.clone(), first.clock.clone(), FAST_TICK);

    let snapshot = second.state.snapshot().unwrap();
    assert!(!snapshot.is_running);
    assert_eq!(snapshot.time_left, 0);
    assert!(!second.state.ticker_active());
    assert_eq!(second.alert.count(), 0);
}
