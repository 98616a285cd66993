use market::{DexPool, Signal};
use serde_json::{Value, json};

pub fn signals_prompt(signals: &[Signal]) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string_pretty(signals)?;
    Ok(format!(
        "Analyze the following list of cryptocurrency trading signals from a CEX.
1. Identify the single signal with the highest 'profit_percent'.
2. Summarize this most promising trade: state the coin, the entry price, and the target price.
3. Check if there are multiple signals for the same coin (e.g., 'ALGO') and briefly comment if this pattern is significant.
4. Provide a very brief, general risk assessment for acting on these types of signals.
Keep the entire analysis concise, clear, and formatted for a retro terminal display.

Data:
{data}
"
    ))
}

pub fn pools_prompt(pools: &[DexPool], deep_mode: bool) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string_pretty(pools)?;

    if deep_mode {
        return Ok(format!(
            "Perform a deep analysis of the following DEX liquidity pool data.
1. Rank the platforms by their combined liquidity across all pairs and name the single deepest pool.
2. For each pair, compare APY against liquidity across platforms and flag pools whose yield looks high relative to their depth.
3. Describe two concrete cross-platform arbitrage strategies for the same pair, including the main execution risks (slippage, gas costs, impermanent loss).
4. Close with a risk rating (LOW, MEDIUM or HIGH) for each strategy and a one-line justification.
Use short titled sections formatted for a retro terminal display.

Data:
{data}
"
        ));
    }

    Ok(format!(
        "Analyze the following DEX liquidity pool data.
1. Identify which platform and pair has the highest liquidity.
2. Explain why high liquidity is crucial for arbitrage traders.
3. Suggest one potential arbitrage strategy involving this high-liquidity pool.
Keep the analysis very brief and to the point, suitable for a retro terminal display.

Data:
{data}
"
    ))
}

pub fn post_prompt() -> &'static str {
    "Write a short blog post for crypto arbitrage traders about a timely theme in \
centralized or decentralized exchange markets (for example liquidity fragmentation, \
funding-rate spreads, or cross-chain bridges). Give it a catchy title, a body of three \
to four short paragraphs in plain text, and an imagePrompt: a vivid, text-free \
description of an illustration in a retro-futuristic terminal style that fits the post."
}

/// Response schema for [`post_prompt`].
pub fn post_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "body": { "type": "STRING" },
            "imagePrompt": { "type": "STRING" }
        },
        "required": ["title", "body", "imagePrompt"],
        "propertyOrdering": ["title", "body", "imagePrompt"]
    })
}
