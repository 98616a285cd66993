use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use adapters::gemini::GenerativeApi;
use common::logger::{TraceId, annotate_generation, root_span};
use market::view::{PoolSort, SortKey};
use market::{DexPool, MarketDataStore};
use parking_lot::Mutex;
use tracing::{Instrument, debug, info, warn};

use crate::desk::{Analysis, Panel, PanelState, user_message};

/// DEX pool screen: sortable pool table, deep-mode switch and AI analysis.
pub struct DexDesk {
    store: Arc<MarketDataStore>,
    ai: Arc<dyn GenerativeApi>,
    sort: Mutex<PoolSort>,
    deep_mode: AtomicBool,
    panel: Panel<Analysis>,
}

impl DexDesk {
    pub fn new(store: Arc<MarketDataStore>, ai: Arc<dyn GenerativeApi>) -> Self {
        Self {
            store,
            ai,
            sort: Mutex::new(PoolSort::default()),
            deep_mode: AtomicBool::new(false),
            panel: Panel::new(),
        }
    }

    /// Pools of the current snapshot in the selected order.
    pub fn sorted_pools(&self) -> Vec<DexPool> {
        let sort = *self.sort.lock();
        sort.apply(&self.store.snapshot().pools)
    }

    pub fn sort(&self) -> PoolSort {
        *self.sort.lock()
    }

    /// Column click: same key flips direction, a new key sorts descending.
    pub fn select_sort(&self, key: SortKey) -> PoolSort {
        let mut g = self.sort.lock();
        g.select(key);
        debug!(key = %g.key, direction = %g.direction, "pool sort changed");
        *g
    }

    pub fn set_sort(&self, sort: PoolSort) {
        *self.sort.lock() = sort;
    }

    pub fn toggle_deep_mode(&self) -> bool {
        !self.deep_mode.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn set_deep_mode(&self, deep: bool) {
        self.deep_mode.store(deep, Ordering::Release);
    }

    pub fn is_deep_mode(&self) -> bool {
        self.deep_mode.load(Ordering::Acquire)
    }

    pub fn analysis(&self) -> PanelState<Analysis> {
        self.panel.state()
    }

    /// Sends the pools, in display order, for analysis.
    pub async fn analyze(&self) -> PanelState<Analysis> {
        let trace_id = TraceId::new();
        let span = root_span("dex_analysis", &trace_id);

        async {
            let snapshot = self.store.snapshot();
            annotate_generation(snapshot.generation);

            let pools = self.sort().apply(&snapshot.pools);
            let deep_mode = self.is_deep_mode();

            let ticket = self.panel.begin();
            let outcome = match self.ai.summarize_pools(&pools, deep_mode).await {
                Ok(text) => {
                    info!(chars = text.len(), deep_mode, "pool analysis ready");
                    Ok(Analysis {
                        text,
                        generation: snapshot.generation,
                        generated_at_ms: snapshot.generated_at_ms,
                    })
                }
                Err(e) => {
                    warn!(error = %e, transient = e.is_transient(), "pool analysis failed");
                    Err(user_message(&e))
                }
            };

            self.panel.finish(ticket, outcome);
            self.panel.state()
        }
        .instrument(span)
        .await
    }
}
