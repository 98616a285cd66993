//! Refresh lifecycle of the market data store, driven on virtual time.

use std::sync::atomic::Ordering;
use std::time::Duration;

use market::{MarketDataStore, REFRESH_PERIOD};
use tokio::time::{Instant, sleep};

const SLACK: Duration = Duration::from_millis(100);

fn assert_near(elapsed: Duration, expected: Duration) {
    assert!(
        elapsed >= expected && elapsed < expected + SLACK,
        "elapsed {elapsed:?}, expected about {expected:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn first_snapshot_is_available_immediately() {
    let store = MarketDataStore::start();

    let snap = store.snapshot();
    assert_eq!(snap.generation, 0);
    assert!((5..=7).contains(&snap.signals.len()));
    assert_eq!(snap.pools.len(), 12);

    assert_eq!(store.signals(), snap.signals);
    assert_eq!(store.pools(), snap.pools);
}

#[tokio::test(start_paused = true)]
async fn each_tick_replaces_signals_and_pools_together() {
    let store = MarketDataStore::start();
    let start = Instant::now();
    let mut rx = store.subscribe();

    rx.changed().await.expect("store alive");
    let first = rx.borrow_and_update().clone();
    assert_eq!(first.generation, 1);
    assert_near(start.elapsed(), REFRESH_PERIOD);

    rx.changed().await.expect("store alive");
    let second = rx.borrow_and_update().clone();
    assert_eq!(second.generation, 2);
    assert_near(start.elapsed(), REFRESH_PERIOD * 2);

    assert_eq!(second.pools.len(), 12);
    assert!((5..=7).contains(&second.signals.len()));
}

#[tokio::test(start_paused = true)]
async fn paused_ticks_leave_the_snapshot_unchanged() {
    let store = MarketDataStore::start();
    store.set_paused(true);
    let before = store.snapshot();

    sleep(REFRESH_PERIOD * 2 + SLACK).await;

    let after = store.snapshot();
    assert_eq!(*after, *before);
    assert_eq!(store.counters().ticks.load(Ordering::Relaxed), 2);
    assert_eq!(store.counters().skipped.load(Ordering::Relaxed), 2);
}

#[tokio::test(start_paused = true)]
async fn resuming_waits_for_the_next_tick_boundary() {
    let store = MarketDataStore::start();
    let start = Instant::now();
    store.set_paused(true);

    sleep(REFRESH_PERIOD + SLACK).await;
    store.set_paused(false);
    tokio::task::yield_now().await;

    assert_eq!(store.snapshot().generation, 0, "resume must not regenerate");

    let mut rx = store.subscribe();
    rx.changed().await.expect("store alive");

    assert_eq!(rx.borrow().generation, 1);
    assert_near(start.elapsed(), REFRESH_PERIOD * 2);
}

#[tokio::test(start_paused = true)]
async fn readers_keep_their_copy_across_refreshes() {
    let store = MarketDataStore::start();
    let held = store.snapshot();
    let held_pools = held.pools.clone();

    sleep(REFRESH_PERIOD + SLACK).await;

    assert_eq!(store.snapshot().generation, 1);
    assert_eq!(held.generation, 0);
    assert_eq!(held.pools, held_pools);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_store_cancels_the_refresh_task() {
    let store = MarketDataStore::start();
    let mut rx = store.subscribe();

    drop(store);

    assert!(
        rx.changed().await.is_err(),
        "no tick may run after disposal"
    );
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_refresh_task() {
    let store = MarketDataStore::start();
    let mut rx = store.subscribe();

    store.shutdown().await;

    assert!(rx.changed().await.is_err());
}
