//! Synthetic market data.
//!
//! Every call produces a fresh, fully random collection. Nothing here can fail
//! and nothing keeps state between calls; the only input is the random stream.

use std::ops::Range;

use chrono::{Local, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::time::now_ms;
use crate::types::{DexPool, MarketSnapshot, Signal};

/// Inclusive bounds of the signal count per generation.
pub const MIN_SIGNALS: usize = 5;
pub const MAX_SIGNALS: usize = 7;

/// Profit percent is drawn from this half-open range before rounding.
pub const PROFIT_PERCENT_RANGE: Range<f64> = 1.0..11.0;

pub static DEX_PLATFORMS: [&str; 4] = ["Uniswap", "Sushiswap", "Pancakeswap", "Curve"];

const SIGNAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fixed part of a signal; prices and time are filled in per generation.
#[derive(Debug, Clone, Copy)]
struct SignalTemplate {
    coin: &'static str,
    exchange: &'static str,
    pair: &'static str,
    grade: &'static str,
    strategy: &'static str,
}

static SIGNAL_TEMPLATES: [SignalTemplate; 7] = [
    SignalTemplate { coin: "ALICE", exchange: "Wallex", pair: "TMN", grade: "Q2", strategy: "Internal" },
    SignalTemplate { coin: "ALGO", exchange: "Wallex", pair: "TMN", grade: "Q2", strategy: "Internal" },
    SignalTemplate { coin: "SAHARA", exchange: "Wallex", pair: "TMN", grade: "Q2", strategy: "Internal" },
    SignalTemplate { coin: "YFI", exchange: "Wallex", pair: "TMN", grade: "Q1", strategy: "Internal" },
    SignalTemplate { coin: "BTC", exchange: "Binance", pair: "USDT", grade: "Q1", strategy: "Breakout" },
    SignalTemplate { coin: "ETH", exchange: "Coinbase", pair: "USDT", grade: "Q2", strategy: "Momentum" },
    SignalTemplate { coin: "SOL", exchange: "Kraken", pair: "USDT", grade: "Q3", strategy: "Internal" },
];

/// Base values and half-width jitter windows for one pool pair.
#[derive(Debug, Clone, Copy)]
pub struct PairProfile {
    pub pair: &'static str,
    pub liquidity_base: f64,
    pub liquidity_jitter: f64,
    pub apy_base: f64,
    pub apy_jitter: f64,
}

pub static DEX_PAIRS: [PairProfile; 3] = [
    PairProfile {
        pair: "ETH/USDC",
        liquidity_base: 10_000_000.0,
        liquidity_jitter: 2_500_000.0,
        apy_base: 5.0,
        apy_jitter: 1.0,
    },
    PairProfile {
        pair: "WBTC/ETH",
        liquidity_base: 5_000_000.0,
        liquidity_jitter: 1_000_000.0,
        apy_base: 3.0,
        apy_jitter: 0.75,
    },
    PairProfile {
        pair: "SOL/USDT",
        liquidity_base: 8_000_000.0,
        liquidity_jitter: 1_500_000.0,
        apy_base: 8.0,
        apy_jitter: 1.5,
    },
];

/// Entry price range by coin tier.
pub fn entry_price_range(coin: &str) -> Range<f64> {
    match coin {
        "BTC" | "YFI" => 20_000.0..70_000.0,
        "ETH" => 3_000.0..5_000.0,
        _ => 1.0..101.0,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Generates 5 to 7 signals in random order, stamped with the current local time.
pub fn generate_signals() -> Vec<Signal> {
    generate_signals_with(&mut rand::thread_rng(), Local::now().naive_local())
}

pub fn generate_signals_with<R: Rng>(rng: &mut R, now: NaiveDateTime) -> Vec<Signal> {
    let signal_time = now.format(SIGNAL_TIME_FORMAT).to_string();

    let mut templates = SIGNAL_TEMPLATES;
    templates.shuffle(rng);

    let count = rng.gen_range(MIN_SIGNALS..=MAX_SIGNALS);

    templates
        .iter()
        .take(count)
        .map(|t| {
            let entry_price = round2(rng.gen_range(entry_price_range(t.coin)));
            let profit_percent = round2(rng.gen_range(PROFIT_PERCENT_RANGE));
            let target_price = entry_price * (1.0 + profit_percent / 100.0);

            Signal {
                coin: t.coin.to_string(),
                entry_price: format!("{entry_price:.2}"),
                exchange: t.exchange.to_string(),
                pair: t.pair.to_string(),
                profit_percent: format!("{profit_percent:.2}"),
                signal_grade: t.grade.to_string(),
                signal_time: signal_time.clone(),
                strategy_name: t.strategy.to_string(),
                target_price: format!("{target_price:.2}"),
            }
        })
        .collect()
}

/// Generates the full platform x pair cross product (12 pools, platform-major).
pub fn generate_dex_pools() -> Vec<DexPool> {
    generate_dex_pools_with(&mut rand::thread_rng())
}

pub fn generate_dex_pools_with<R: Rng>(rng: &mut R) -> Vec<DexPool> {
    DEX_PLATFORMS
        .iter()
        .flat_map(|platform| DEX_PAIRS.iter().map(move |profile| (*platform, profile)))
        .map(|(platform, profile)| {
            let liquidity = profile.liquidity_base
                + rng.gen_range(-profile.liquidity_jitter..profile.liquidity_jitter);
            let apy = profile.apy_base + rng.gen_range(-profile.apy_jitter..profile.apy_jitter);

            DexPool {
                platform: platform.to_string(),
                pair: profile.pair.to_string(),
                liquidity: liquidity.round() as u64,
                apy: round2(apy),
            }
        })
        .collect()
}

/// Builds both collections in one step.
pub fn generate_snapshot(generation: u64) -> MarketSnapshot {
    MarketSnapshot {
        generation,
        generated_at_ms: now_ms(),
        signals: generate_signals(),
        pools: generate_dex_pools(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(13, 45, 10))
            .unwrap()
    }

    fn num(s: &str) -> f64 {
        s.parse().expect("numeric text")
    }

    #[test]
    fn signal_count_is_between_five_and_seven() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let signals = generate_signals_with(&mut rng, fixed_time());
            assert!((MIN_SIGNALS..=MAX_SIGNALS).contains(&signals.len()));
        }
    }

    #[test]
    fn every_count_in_range_is_reachable() {
        let mut rng = StdRng::seed_from_u64(11);
        let seen: HashSet<usize> = (0..500)
            .map(|_| generate_signals_with(&mut rng, fixed_time()).len())
            .collect();
        assert_eq!(seen, HashSet::from([5, 6, 7]));
    }

    #[test]
    fn signals_are_unique_coins_from_the_candidate_set() {
        let mut rng = StdRng::seed_from_u64(3);
        let allowed: HashSet<&str> = SIGNAL_TEMPLATES.iter().map(|t| t.coin).collect();

        let signals = generate_signals_with(&mut rng, fixed_time());
        let coins: HashSet<&str> = signals.iter().map(|s| s.coin.as_str()).collect();

        assert_eq!(coins.len(), signals.len(), "no coin may appear twice");
        assert!(coins.is_subset(&allowed));
    }

    #[test]
    fn templates_keep_their_fixed_fields() {
        let mut rng = StdRng::seed_from_u64(5);
        for s in generate_signals_with(&mut rng, fixed_time()) {
            let t = SIGNAL_TEMPLATES.iter().find(|t| t.coin == s.coin).unwrap();
            assert_eq!(s.exchange, t.exchange);
            assert_eq!(s.pair, t.pair);
            assert_eq!(s.signal_grade, t.grade);
            assert_eq!(s.strategy_name, t.strategy);
        }
    }

    #[test]
    fn numeric_fields_have_two_decimals() {
        let mut rng = StdRng::seed_from_u64(9);
        for s in generate_signals_with(&mut rng, fixed_time()) {
            for field in [&s.entry_price, &s.target_price, &s.profit_percent] {
                let (_, frac) = field.split_once('.').expect("decimal point");
                assert_eq!(frac.len(), 2, "{field} should carry two decimals");
            }
        }
    }

    #[test]
    fn entry_prices_follow_coin_tiers() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            for s in generate_signals_with(&mut rng, fixed_time()) {
                let price = num(&s.entry_price);
                let (lo, hi) = match s.coin.as_str() {
                    "BTC" | "YFI" => (20_000.0, 70_000.0),
                    "ETH" => (3_000.0, 5_000.0),
                    _ => (1.0, 101.0),
                };
                assert!(price >= lo && price <= hi, "{} priced {price}", s.coin);
            }
        }
    }

    #[test]
    fn signal_time_uses_local_timestamp_format() {
        let mut rng = StdRng::seed_from_u64(1);
        let signals = generate_signals_with(&mut rng, fixed_time());
        assert!(signals.iter().all(|s| s.signal_time == "2024-05-01 13:45:10"));
    }

    #[test]
    fn pools_are_the_full_cross_product() {
        let mut rng = StdRng::seed_from_u64(2);
        let pools = generate_dex_pools_with(&mut rng);

        assert_eq!(pools.len(), 12);

        let combos: HashSet<(&str, &str)> = pools
            .iter()
            .map(|p| (p.platform.as_str(), p.pair.as_str()))
            .collect();
        assert_eq!(combos.len(), 12, "every combination exactly once");

        for p in &pools {
            assert!(DEX_PLATFORMS.contains(&p.platform.as_str()));
            assert!(DEX_PAIRS.iter().any(|d| d.pair == p.pair));
        }
    }

    #[test]
    fn pool_order_is_platform_major() {
        let mut rng = StdRng::seed_from_u64(4);
        let pools = generate_dex_pools_with(&mut rng);

        assert_eq!(pools[0].platform, "Uniswap");
        assert_eq!(pools[0].pair, "ETH/USDC");
        assert_eq!(pools[2].pair, "SOL/USDT");
        assert_eq!(pools[3].platform, "Sushiswap");
        assert_eq!(pools[11].platform, "Curve");
    }

    #[test]
    fn pool_magnitudes_stay_within_jitter_windows() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            for p in generate_dex_pools_with(&mut rng) {
                let profile = DEX_PAIRS.iter().find(|d| d.pair == p.pair).unwrap();
                let liq = p.liquidity as f64;
                assert!(liq >= profile.liquidity_base - profile.liquidity_jitter);
                assert!(liq <= profile.liquidity_base + profile.liquidity_jitter);
                assert!(p.apy >= profile.apy_base - profile.apy_jitter - 0.005);
                assert!(p.apy <= profile.apy_base + profile.apy_jitter + 0.005);
            }
        }
    }

    #[test]
    fn snapshot_carries_generation_and_both_collections() {
        let snap = generate_snapshot(4);
        assert_eq!(snap.generation, 4);
        assert!((MIN_SIGNALS..=MAX_SIGNALS).contains(&snap.signals.len()));
        assert_eq!(snap.pools.len(), 12);
        assert!(snap.generated_at_ms > 0);
    }

    #[test]
    fn signals_serialize_with_snake_case_fields() {
        let mut rng = StdRng::seed_from_u64(6);
        let signals = generate_signals_with(&mut rng, fixed_time());
        let json = serde_json::to_value(&signals[0]).unwrap();

        for key in [
            "coin",
            "entry_price",
            "exchange",
            "pair",
            "profit_percent",
            "signal_grade",
            "signal_time",
            "strategy_name",
            "target_price",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]
        #[test]
        fn target_price_is_derived_from_entry_and_profit(seed in any::<u64>()) {
            let now = NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let signals = generate_signals_with(&mut rng, now);

            prop_assert!((MIN_SIGNALS..=MAX_SIGNALS).contains(&signals.len()));

            for s in &signals {
                let entry: f64 = s.entry_price.parse().unwrap();
                let profit: f64 = s.profit_percent.parse().unwrap();
                let target: f64 = s.target_price.parse().unwrap();

                prop_assert!((1.0..=11.0).contains(&profit), "profit {}", profit);

                let expected = entry * (1.0 + profit / 100.0);
                prop_assert!(
                    (target - expected).abs() <= 0.005 + 1e-6,
                    "target {} vs expected {}", target, expected
                );
            }
        }

        #[test]
        fn pool_set_never_depends_on_randomness(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let pools = generate_dex_pools_with(&mut rng);

            let labels: Vec<(String, String)> =
                pools.into_iter().map(|p| (p.platform, p.pair)).collect();
            let expected: Vec<(String, String)> = DEX_PLATFORMS
                .iter()
                .flat_map(|pl| DEX_PAIRS.iter().map(move |d| (pl.to_string(), d.pair.to_string())))
                .collect();

            prop_assert_eq!(labels, expected);
        }
    }
}
