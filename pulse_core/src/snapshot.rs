//! Transient market observations and their recovery from rendered text.
//!
//! The bot never persists the figures it shows. The previously sent card is
//! the only durable record of the "original" value, so a later comparison
//! re-reads it from the message text. That makes the rendered card a
//! serialization format with known precision loss: the compact formatter
//! keeps one fractional digit at the suffix scale, and everything recovered
//! here carries that bounded error (see `crate::parse`).

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::parse::parse_compact;

/// A price or market-cap observation at a point in time. Held in memory for
/// the duration of one comparison and then dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub value: f64,
    pub observed_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(value: f64, observed_at: DateTime<Utc>) -> Self {
        Self { value, observed_at }
    }

    pub fn now(value: f64) -> Self {
        Self::new(value, Utc::now())
    }
}

/// Recover the compact dollar figure rendered under `label` in previously
/// sent card text.
///
/// The card template wraps each figure in a padded code span
/// (`` `   $1.5M   ` ``); the pattern tolerates the backticks, pre tags,
/// padding and thousands separators, and decodes the match with
/// [`parse_compact`]. The match is anchored to the field template itself
/// (label, then only markup and whitespace, then the dollar figure), so a
/// label word occurring in free text such as a token name cannot hijack the
/// recall; an occurrence followed by prose simply does not match and the
/// search moves on to the real field. Returns `None` when no field matches;
/// the `"N/A"` sentinel has no digits, so it counts as absent too.
pub fn recall_rendered_value(text: &str, label: &str) -> Option<f64> {
    let pattern = format!(
        r"{}(?:</b>)?:?\s*(?:<pre>|`+)?\s*\$\s*([0-9][0-9,]*(?:\.[0-9]+)?\s*[KkMmBb]?)",
        regex::escape(label)
    );
    let re = Regex::new(&pattern).ok()?;
    let captured = re.captures(text)?.get(1)?.as_str();

    Some(parse_compact(captured))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_compact;

    #[test]
    fn recalls_value_from_card_template() {
        let card = "🐋 Market Cap\n<pre>   $1.5M   </pre>\n🔐 Liquidity\n<pre>   $250.0K   </pre>";
        assert_eq!(recall_rendered_value(card, "Market Cap"), Some(1_500_000.0));
        assert_eq!(recall_rendered_value(card, "Liquidity"), Some(250_000.0));
    }

    #[test]
    fn tolerates_code_fences_and_separators() {
        let card = "Market Cap: ```   $1,234.5K   ```";
        assert_eq!(recall_rendered_value(card, "Market Cap"), Some(1_234_500.0));
    }

    #[test]
    fn label_word_in_free_text_does_not_hijack_recall() {
        // Token names are arbitrary input; a name containing a field label
        // must not anchor the recall in the title and steal the first
        // figure that follows it.
        let card = "Price Pump (PUMP) - ETHEREUM\n\n\
                    🐋 Market Cap\n<pre>   $1.5M   </pre>\n\
                    📊 Price\n<pre>   $0.0042   </pre>";
        assert_eq!(recall_rendered_value(card, "Price"), Some(0.0042));
        assert_eq!(recall_rendered_value(card, "Market Cap"), Some(1_500_000.0));
    }

    #[test]
    fn missing_label_or_figure_yields_none() {
        assert_eq!(recall_rendered_value("no numbers here", "Market Cap"), None);
        assert_eq!(recall_rendered_value("Market Cap\n<pre>   $N/A   </pre>", "Market Cap"), None);
        assert_eq!(recall_rendered_value("", "Market Cap"), None);
    }

    #[test]
    fn recalled_value_carries_the_formatting_error_bound() {
        let original = 1_234_567.0_f64;
        let card = format!("Market Cap\n<pre>   ${}   </pre>", format_compact(Some(original)));
        let recovered = recall_rendered_value(&card, "Market Cap").unwrap();
        // One display digit at the M scale: at most 0.05M of drift.
        assert!((recovered - original).abs() <= 50_000.0);
    }
}
