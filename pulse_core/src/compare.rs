//! Comparison orchestrator: resolves the "original" value for a comparison
//! and assembles the rendered outcome. Pure; the callers do all fetching.

use crate::delta::{PriceDelta, format_delta, format_multiplier};
use crate::snapshot::{Snapshot, recall_rendered_value};

/// Outcome of a comparison: the raw delta plus its rendered display lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub delta: PriceDelta,
    pub display: String,
}

/// Compare a freshly observed snapshot against the value previously shown
/// under `label` in `rendered_original`.
///
/// Resolution order for the original value:
/// 1. `historical_override`, when supplied, finite and positive (a
///    higher-precision figure from a historical-data provider);
/// 2. the value recalled from the rendered text (lossy, see
///    [`crate::snapshot`]);
/// 3. neither available: the current snapshot becomes its own baseline and
///    the outcome is the neutral identity.
///
/// Always produces a displayable result; never errors.
pub fn compare_snapshots(
    rendered_original: &str,
    label: &str,
    current: &Snapshot,
    historical_override: Option<f64>,
) -> Comparison {
    let original = historical_override
        .filter(|value| value.is_finite() && *value > 0.0)
        .or_else(|| recall_rendered_value(rendered_original, label))
        .unwrap_or(current.value);

    let delta = PriceDelta::between(Some(original), Some(current.value));
    let display = format!(
        "{}\n{}",
        format_delta(&delta),
        format_multiplier(delta.multiplier)
    );

    Comparison { delta, display }
}
