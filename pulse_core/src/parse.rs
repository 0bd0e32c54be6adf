//! Inverse of the compact formatter. Recovers an approximate numeric value
//! from a display string such as `"$1,234.5K"`.
//!
//! Because the formatter keeps a single fractional digit after scaling,
//! `parse_compact(format_compact(x))` is an approximation of `x`, not an
//! exact inverse: the error is bounded by half a tenth of the suffix scale
//! (so at most 0.05B for billions, 0.05M for millions, and so on). Callers
//! computing deltas over a parsed value carry that bounded error.

/// Parse a compact display string back into a number.
///
/// Currency symbols and thousands separators are stripped, and a trailing
/// `K`/`M`/`B` (any case) scales the prefix by 1e3/1e6/1e9. Anything
/// unparseable degrades to `0.0`; this function never fails loudly.
pub fn parse_compact(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }

    let (prefix, scale) = match cleaned.chars().last() {
        Some('K') | Some('k') => (&cleaned[..cleaned.len() - 1], 1e3),
        Some('M') | Some('m') => (&cleaned[..cleaned.len() - 1], 1e6),
        Some('B') | Some('b') => (&cleaned[..cleaned.len() - 1], 1e9),
        _ => (cleaned, 1.0),
    };

    match prefix.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value * scale,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_compact;

    #[test]
    fn scales_suffixed_values() {
        assert_eq!(parse_compact("1.5M"), 1_500_000.0);
        assert_eq!(parse_compact("$250K"), 250_000.0);
        assert_eq!(parse_compact("2B"), 2_000_000_000.0);
        assert_eq!(parse_compact("3.7b"), 3_700_000_000.0);
    }

    #[test]
    fn strips_currency_symbol_and_separators() {
        assert_eq!(parse_compact("$1,234.5K"), 1_234_500.0);
        assert_eq!(parse_compact("$1,000,000"), 1_000_000.0);
    }

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(parse_compact("42"), 42.0);
        assert_eq!(parse_compact("0.5"), 0.5);
    }

    #[test]
    fn garbage_degrades_to_zero() {
        assert_eq!(parse_compact("garbage"), 0.0);
        assert_eq!(parse_compact(""), 0.0);
        assert_eq!(parse_compact("   "), 0.0);
        assert_eq!(parse_compact("$"), 0.0);
        assert_eq!(parse_compact("K"), 0.0);
        assert_eq!(parse_compact("inf"), 0.0);
    }

    #[test]
    fn round_trip_error_stays_within_half_a_display_digit() {
        // One fractional digit at the suffix scale: the recovered value may
        // be off by at most 0.05 * scale.
        for x in [
            1_000.0_f64,
            1_234.0,
            987_654.0,
            1_500_000.0,
            123_456_789.0,
            9_876_543_210.0,
        ] {
            let recovered = parse_compact(&format_compact(Some(x)));
            let scale = if x >= 1e9 {
                1e9
            } else if x >= 1e6 {
                1e6
            } else {
                1e3
            };
            assert!(
                (recovered - x).abs() <= 0.05 * scale + 1e-9,
                "x={x} recovered={recovered}"
            );
        }
    }
}
