use adapters::gemini::AspectRatio;
use clap::{Parser, Subcommand};
use market::view::{SortDirection, SortKey};

#[derive(Debug, Parser)]
#[clap(name = "signal-desk", version)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Live dashboard refreshed every 3 s (default)
    Watch,

    /// Analyze the current CEX signals once
    AnalyzeCex,

    /// Analyze the current DEX pools once
    AnalyzeDex {
        /// Column the pools are sorted by before analysis
        #[clap(long, default_value = "liquidity")]
        sort: SortKey,

        #[clap(long, default_value = "desc")]
        direction: SortDirection,

        /// Ask for the slower, deeper analysis
        #[clap(long)]
        deep: bool,
    },

    /// Generate a blog post with a 16:9 illustration
    Blog,

    /// Generate a single image
    Image {
        #[clap(long)]
        prompt: String,

        /// One of 1:1, 16:9, 9:16
        #[clap(long, default_value = "1:1")]
        aspect_ratio: AspectRatio,
    },
}

/// Single-key commands read from stdin in watch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKey {
    TogglePause,
    Refresh,
    Sort(SortKey),
    ToggleDeepMode,
    AnalyzeSignals,
    AnalyzePools,
    Blog,
    Quit,
}

impl WatchKey {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" => Some(WatchKey::TogglePause),
            "r" => Some(WatchKey::Refresh),
            "l" => Some(WatchKey::Sort(SortKey::Liquidity)),
            "a" => Some(WatchKey::Sort(SortKey::Apy)),
            "d" => Some(WatchKey::ToggleDeepMode),
            "c" => Some(WatchKey::AnalyzeSignals),
            "x" => Some(WatchKey::AnalyzePools),
            "b" => Some(WatchKey::Blog),
            "q" | "quit" => Some(WatchKey::Quit),
            _ => None,
        }
    }
}
