//! Signed price movement between two observations, with the display
//! conventions used by the comparison controls.

use crate::format::format_compact;

/// Tri-state classification of a price movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Result of comparing an original value against a current one.
///
/// The trend always agrees with the sign of `difference`, and `multiplier`
/// is `current / original` (1.0 when the inputs were unusable).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceDelta {
    pub difference: f64,
    pub percentage: f64,
    pub multiplier: f64,
    pub trend: Trend,
}

impl PriceDelta {
    /// The neutral identity: no movement at all. Returned whenever either
    /// input is missing, non-finite or non-positive, so callers never see a
    /// division by zero or a negative-base percentage.
    pub const NEUTRAL: PriceDelta = PriceDelta {
        difference: 0.0,
        percentage: 0.0,
        multiplier: 1.0,
        trend: Trend::Stable,
    };

    /// Compute the movement from `original` to `current`.
    pub fn between(original: Option<f64>, current: Option<f64>) -> Self {
        let (Some(original), Some(current)) = (original, current) else {
            return Self::NEUTRAL;
        };
        if !original.is_finite() || !current.is_finite() || original <= 0.0 || current <= 0.0 {
            return Self::NEUTRAL;
        }

        let difference = current - original;
        let trend = if difference > 0.0 {
            Trend::Up
        } else if difference < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        };

        PriceDelta {
            difference,
            percentage: difference / original * 100.0,
            multiplier: current / original,
            trend,
        }
    }
}

/// Render a delta as `<glyph> <sign>$<compact |difference|> (<sign><pct>%)`.
pub fn format_delta(delta: &PriceDelta) -> String {
    let (sign, glyph) = match delta.trend {
        Trend::Up => ("+", "📈"),
        Trend::Down => ("-", "📉"),
        Trend::Stable => ("", "➡️"),
    };

    format!(
        "{} {}${} ({}{:.2}%)",
        glyph,
        sign,
        format_compact(Some(delta.difference.abs())),
        sign,
        delta.percentage.abs()
    )
}

/// Render a multiplier. Values below 1 are shown as their reciprocal so the
/// displayed figure is always at least 1, framed as "times smaller".
pub fn format_multiplier(multiplier: f64) -> String {
    if multiplier >= 1.0 {
        format!("🚀 {:.2}x", multiplier)
    } else {
        format!("📉 {:.2}x down", 1.0 / multiplier)
    }
}

/// Classify transaction flow from buy/sell counts.
pub fn market_trend(buys: u64, sells: u64) -> &'static str {
    if buys > sells {
        "🟢 Inflow"
    } else if buys < sells {
        "🔴 Outflow"
    } else {
        "⚪ Stable"
    }
}
