pub mod generator;
pub mod store;
pub mod time;
pub mod types;
pub mod view;

pub use store::{MarketDataStore, REFRESH_PERIOD, RefreshCounters};
pub use types::{DexPool, MarketSnapshot, Signal};
