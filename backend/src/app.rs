use std::sync::Arc;

use adapters::gemini::GenerativeApi;
use market::MarketDataStore;

use crate::desk::{BlogDesk, CexDesk, DexDesk, ImageDesk};

/// One shared store and AI client per process, handed to every desk.
pub struct App {
    pub store: Arc<MarketDataStore>,
    pub cex: CexDesk,
    pub dex: DexDesk,
    pub blog: BlogDesk,
    pub image: ImageDesk,
}

impl App {
    pub fn new(store: Arc<MarketDataStore>, ai: Arc<dyn GenerativeApi>) -> Self {
        Self {
            cex: CexDesk::new(Arc::clone(&store), Arc::clone(&ai)),
            dex: DexDesk::new(Arc::clone(&store), Arc::clone(&ai)),
            blog: BlogDesk::new(Arc::clone(&ai)),
            image: ImageDesk::new(ai),
            store,
        }
    }
}
