//! Display formatting for market figures. Every function degrades to the
//! `"N/A"` sentinel on missing or unusable input instead of failing.

/// Sentinel rendered when a figure is absent or unusable.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a large figure into a compact human string with a K/M/B suffix.
///
/// Scaled values carry exactly one fractional digit (`1_500_000` →
/// `"1.5M"`); values below 1 000 render as their plain decimal string.
/// `None`, zero and non-finite values all render as `"N/A"`.
pub fn format_compact(value: Option<f64>) -> String {
    let Some(num) = value else {
        return NOT_AVAILABLE.to_string();
    };
    if num == 0.0 || !num.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    if num >= 1e9 {
        format!("{:.1}B", num / 1e9)
    } else if num >= 1e6 {
        format!("{:.1}M", num / 1e6)
    } else if num >= 1e3 {
        format!("{:.1}K", num / 1e3)
    } else {
        format!("{}", num)
    }
}

/// Format a token price with precision scaled to its magnitude, so
/// micro-cap prices keep their significant digits.
pub fn format_price(value: Option<f64>) -> String {
    let Some(price) = value else {
        return NOT_AVAILABLE.to_string();
    };
    if price == 0.0 || !price.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    if price >= 1.0 {
        format!("{:.4}", price)
    } else if price >= 0.01 {
        format!("{:.6}", price)
    } else {
        format!("{:.8}", price)
    }
}

/// Format a percentage change at two decimals, sentinel on missing input.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(pct) if pct.is_finite() => format!("{:.2}%", pct),
        _ => NOT_AVAILABLE.to_string(),
    }
}
