use serde::{Deserialize, Serialize};

/// Mock CEX trading signal.
///
/// Numeric fields are carried as text with two decimals so the displayed and
/// serialized values never drift from each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub coin: String,
    pub entry_price: String,
    pub exchange: String,
    pub pair: String,
    pub profit_percent: String,
    pub signal_grade: String,
    pub signal_time: String,
    pub strategy_name: String,
    pub target_price: String,
}

/// DEX liquidity pool snapshot for one platform/pair combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexPool {
    pub platform: String,
    pub pair: String,

    /// Pool depth, rounded to whole units.
    pub liquidity: u64,

    /// Annualized yield in percent, two decimals.
    pub apy: f64,
}

/// Both collections as produced by one generation step.
///
/// Signals and pools are only ever replaced together, by swapping the whole
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    /// 0 for the creation-time generation, +1 for every regeneration.
    pub generation: u64,

    /// Wall-clock generation time (ms since epoch).
    pub generated_at_ms: u64,

    pub signals: Vec<Signal>,
    pub pools: Vec<DexPool>,
}
