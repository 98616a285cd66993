//! Plain-text rendering for the terminal front end.

use std::fmt::Write;

use market::view::format::{format_apy, format_liquidity, format_signal_price, format_signal_time};
use market::view::{PoolSort, SortDirection, SortKey};
use market::{DexPool, Signal};

use crate::app::App;
use crate::desk::{Analysis, BlogPost, GeneratedImage, PanelState};

pub fn render_signals(signals: &[Signal]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<9} {:<5} {:>12} {:>12} {:>7} {:<5} {:<9} {:<8}",
        "COIN", "EXCHANGE", "PAIR", "ENTRY", "TARGET", "PROFIT", "GRADE", "STRATEGY", "TIME"
    );
    for s in signals {
        let _ = writeln!(
            out,
            "{:<8} {:<9} {:<5} {:>12} {:>12} {:>6}% {:<5} {:<9} {:<8}",
            s.coin,
            s.exchange,
            s.pair,
            format_signal_price(&s.entry_price),
            format_signal_price(&s.target_price),
            s.profit_percent,
            s.signal_grade,
            s.strategy_name,
            format_signal_time(&s.signal_time),
        );
    }
    out
}

fn sort_marker(sort: PoolSort, key: SortKey) -> &'static str {
    match (sort.key == key, sort.direction) {
        (false, _) => "",
        (true, SortDirection::Asc) => " ^",
        (true, SortDirection::Desc) => " v",
    }
}

pub fn render_pools(pools: &[DexPool], sort: PoolSort) -> String {
    let mut out = String::new();
    let liquidity = format!("LIQUIDITY{}", sort_marker(sort, SortKey::Liquidity));
    let apy = format!("APY{}", sort_marker(sort, SortKey::Apy));

    let _ = writeln!(
        out,
        "{:<12} {:<9} {:>12} {:>8}",
        "PLATFORM", "PAIR", liquidity, apy
    );
    for p in pools {
        let _ = writeln!(
            out,
            "{:<12} {:<9} {:>12} {:>8}",
            p.platform,
            p.pair,
            format_liquidity(p.liquidity),
            format_apy(p.apy),
        );
    }
    out
}

pub fn render_panel<T>(title: &str, state: &PanelState<T>, body: impl Fn(&T) -> String) -> String {
    match state {
        PanelState::Idle => String::new(),
        PanelState::Loading => format!("[{title}] analyzing...\n"),
        PanelState::Ready(v) => format!("[{title}]\n{}\n", body(v)),
        PanelState::Failed(message) => format!("[{title}] {message}\n"),
    }
}

pub fn analysis_body(a: &Analysis) -> String {
    format!("(snapshot #{})\n{}", a.generation, a.text.trim_end())
}

pub fn blog_body(post: &BlogPost) -> String {
    format!(
        "{}\n\n{}\n\nimage: {} ({} base64 chars)",
        post.title,
        post.body.trim_end(),
        post.image.mime_type().unwrap_or("unknown"),
        post.image.payload_len()
    )
}

pub fn image_body(img: &GeneratedImage) -> String {
    format!(
        "{} [{}]: {} ({} base64 chars)",
        img.prompt,
        img.aspect_ratio,
        img.image.mime_type().unwrap_or("unknown"),
        img.image.payload_len()
    )
}

pub fn status_line(generation: u64, paused: bool, sort: PoolSort, deep_mode: bool) -> String {
    format!(
        "snapshot #{generation} | {} | sort {} {} | deep analysis {}",
        if paused { "PAUSED" } else { "LIVE" },
        sort.key,
        sort.direction,
        if deep_mode { "on" } else { "off" },
    )
}

/// Full watch-mode screen for the current state of every desk.
pub fn render_dashboard(app: &App) -> String {
    let snapshot = app.store.snapshot();
    let sort = app.dex.sort();

    let mut out = String::new();
    out.push_str(&status_line(
        snapshot.generation,
        app.store.is_paused(),
        sort,
        app.dex.is_deep_mode(),
    ));
    out.push_str("\n\n== CEX signals ==\n");
    out.push_str(&render_signals(&snapshot.signals));
    out.push_str(&render_panel("Signal analysis", &app.cex.analysis(), analysis_body));
    out.push_str("\n== DEX pools ==\n");
    out.push_str(&render_pools(&sort.apply(&snapshot.pools), sort));
    out.push_str(&render_panel("Pool analysis", &app.dex.analysis(), analysis_body));
    out.push_str(&render_panel("Blog", &app.blog.post(), blog_body));
    out.push('\n');
    out.push_str(KEY_HELP);
    out
}

const KEY_HELP: &str = "[p] pause  [r] refresh  [l] sort liquidity  [a] sort apy  \
[d] deep mode  [c] analyze signals  [x] analyze pools  [b] blog  [q] quit\n";
