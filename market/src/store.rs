//! Market data store.
//!
//! Owns the current [`MarketSnapshot`] and the refresh task that regenerates
//! it on a fixed cadence:
//!
//! start → generation 0 (immediate) → tick every [`REFRESH_PERIOD`] → ...
//!
//! While paused the ticks keep firing but are skipped. Resuming never forces
//! a generation; the next regular tick does. Dropping the store aborts the
//! refresh task, after which subscribers observe the channel closing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::generator::generate_snapshot;
use crate::types::{DexPool, MarketSnapshot, Signal};

/// Fixed regeneration cadence.
pub const REFRESH_PERIOD: Duration = Duration::from_millis(3_000);

/// Minimal counters for operational visibility.
#[derive(Clone, Default, Debug)]
pub struct RefreshCounters {
    /// Timer ticks observed, paused or not.
    pub ticks: Arc<AtomicU64>,

    /// Snapshots produced after creation (ticks and manual refreshes).
    pub regenerations: Arc<AtomicU64>,

    /// Ticks ignored because the store was paused.
    pub skipped: Arc<AtomicU64>,
}

struct Shared {
    snapshot_tx: watch::Sender<Arc<MarketSnapshot>>,
    paused: AtomicBool,
    counters: RefreshCounters,
}

impl Shared {
    /// Replaces the whole snapshot and returns the new generation.
    fn regenerate(&self) -> u64 {
        let mut generation = 0;
        self.snapshot_tx.send_modify(|current| {
            generation = current.generation + 1;
            *current = Arc::new(generate_snapshot(generation));
        });
        self.counters.regenerations.fetch_add(1, Ordering::Relaxed);
        generation
    }
}

pub struct MarketDataStore {
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl MarketDataStore {
    /// Generates the first snapshot and spawns the refresh task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start() -> Self {
        let (snapshot_tx, _) = watch::channel(Arc::new(generate_snapshot(0)));

        let shared = Arc::new(Shared {
            snapshot_tx,
            paused: AtomicBool::new(false),
            counters: RefreshCounters::default(),
        });

        let task = tokio::spawn(run_refresh_loop(Arc::clone(&shared)));

        info!(
            every_ms = REFRESH_PERIOD.as_millis() as u64,
            "market data store started"
        );

        Self {
            shared,
            task: Some(task),
        }
    }

    /// Current snapshot. Readers get an immutable shared copy.
    pub fn snapshot(&self) -> Arc<MarketSnapshot> {
        Arc::clone(&self.shared.snapshot_tx.borrow())
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.snapshot().signals.clone()
    }

    pub fn pools(&self) -> Vec<DexPool> {
        self.snapshot().pools.clone()
    }

    /// Change notifications; the current value counts as already seen.
    pub fn subscribe(&self) -> watch::Receiver<Arc<MarketSnapshot>> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Flips the pause flag and returns the new state.
    pub fn toggle_pause(&self) -> bool {
        let paused = !self.shared.paused.fetch_xor(true, Ordering::AcqRel);
        info!(paused, "refresh pause toggled");
        paused
    }

    pub fn set_paused(&self, paused: bool) {
        self.shared.paused.store(paused, Ordering::Release);
        info!(paused, "refresh pause set");
    }

    pub fn is_paused(&self) -> bool {
        self.shared.paused.load(Ordering::Acquire)
    }

    /// Regenerates immediately, ignoring the pause flag.
    pub fn refresh_now(&self) -> u64 {
        let generation = self.shared.regenerate();
        debug!(generation, "market data regenerated on demand");
        generation
    }

    pub fn counters(&self) -> &RefreshCounters {
        &self.shared.counters
    }

    /// Stops the refresh task and waits until it is gone.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            info!("market data store stopped");
        }
    }
}

impl Drop for MarketDataStore {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("market data store dropped; refresh task aborted");
        }
    }
}

async fn run_refresh_loop(shared: Arc<Shared>) {
    // The creation-time generation stands in for the first tick.
    let mut ticker = interval_at(Instant::now() + REFRESH_PERIOD, REFRESH_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        shared.counters.ticks.fetch_add(1, Ordering::Relaxed);

        if shared.paused.load(Ordering::Acquire) {
            shared.counters.skipped.fetch_add(1, Ordering::Relaxed);
            debug!("refresh tick skipped (paused)");
            continue;
        }

        let generation = shared.regenerate();
        debug!(generation, "market data regenerated");
    }
}
