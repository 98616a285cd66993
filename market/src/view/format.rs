//! Text formatting for table cells.

/// en-US style price: thousands grouped, at most three fraction digits,
/// trailing zeros dropped. Text that is not a number comes back unchanged.
pub fn format_signal_price(price: &str) -> String {
    let value = match price.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return price.to_string(),
    };

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Time part of a `YYYY-MM-DD HH:MM:SS` stamp, or empty when there is none.
pub fn format_signal_time(timestamp: &str) -> &str {
    timestamp.split(' ').nth(1).unwrap_or("")
}

/// Liquidity in millions, e.g. `$10.23M`.
pub fn format_liquidity(liquidity: u64) -> String {
    format!("${:.2}M", liquidity as f64 / 1_000_000.0)
}

pub fn format_apy(apy: f64) -> String {
    format!("{apy:.2}%")
}
