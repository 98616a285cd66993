use std::sync::Arc;

use adapters::gemini::GenerativeApi;
use common::logger::{TraceId, annotate_generation, root_span};
use market::{MarketDataStore, Signal};
use tracing::{Instrument, info, warn};

use crate::desk::{Analysis, Panel, PanelState, user_message};

/// CEX signal screen: live signal list plus on-demand AI analysis.
pub struct CexDesk {
    store: Arc<MarketDataStore>,
    ai: Arc<dyn GenerativeApi>,
    panel: Panel<Analysis>,
}

impl CexDesk {
    pub fn new(store: Arc<MarketDataStore>, ai: Arc<dyn GenerativeApi>) -> Self {
        Self {
            store,
            ai,
            panel: Panel::new(),
        }
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.store.signals()
    }

    pub fn analysis(&self) -> PanelState<Analysis> {
        self.panel.state()
    }

    /// Sends the current signals for analysis and publishes the outcome.
    pub async fn analyze(&self) -> PanelState<Analysis> {
        let trace_id = TraceId::new();
        let span = root_span("cex_analysis", &trace_id);

        async {
            let snapshot = self.store.snapshot();
            annotate_generation(snapshot.generation);

            let ticket = self.panel.begin();
            let outcome = match self.ai.summarize_signals(&snapshot.signals).await {
                Ok(text) => {
                    info!(chars = text.len(), "signal analysis ready");
                    Ok(Analysis {
                        text,
                        generation: snapshot.generation,
                        generated_at_ms: snapshot.generated_at_ms,
                    })
                }
                Err(e) => {
                    warn!(error = %e, transient = e.is_transient(), "signal analysis failed");
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
