use pulse_core::{format_compact, format_percent, format_price, market_trend};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::html::escape;

use crate::compare::dto::{CallbackAction, ChartTimeframe};
use crate::dexscreener::dto::Pair;

/// Field labels on the summary card. The comparison flow recalls figures
/// from the sent card text by these labels, so they double as the schema of
/// the lossy serialization the card is.
pub const FIELD_MARKET_CAP: &str = "Market Cap";
pub const FIELD_PRICE: &str = "Price";

/// Render the token summary card as Telegram HTML. Each figure sits inside
/// a padded `<pre>` span so the recall pattern can find it later.
pub fn build_token_card(pair: &Pair, footer: &str) -> String {
    let (buys, sells) = pair.txns_h24();

    let mut card = format!(
        "<b>{} ({}) - {}</b>\n\n",
        escape(&pair.base_token.name),
        escape(&pair.base_token.symbol),
        escape(&pair.chain_id.to_uppercase())
    );

    card.push_str(&field("🐋", FIELD_MARKET_CAP, &dollar(format_compact(pair.market_cap))));
    card.push_str(&field("🔐", "Liquidity", &dollar(format_compact(pair.liquidity_usd()))));
    card.push_str(&field("⚖️", "FDV", &dollar(format_compact(pair.fdv))));
    card.push_str(&field("📈", "1h Change", &format_percent(pair.change_h1())));
    card.push_str(&field("💹", "24h Change", &format_percent(pair.change_h24())));
    card.push_str(&field("🕒", "Volume 24h", &dollar(format_compact(pair.volume_h24()))));
    card.push_str(&field("📊", FIELD_PRICE, &dollar(format_price(pair.price_usd()))));
    card.push_str(&field("🧾", "Buys / Sells", &format!("{} / {}", buys, sells)));
    card.push_str(&field("💸", "Flow Trend", market_trend(buys, sells)));

    card.push_str(&format!(
        "🏷️ <b>Contract Address</b>\n<pre>{}</pre>\n\n",
        escape(&pair.base_token.address)
    ));
    card.push_str(&escape(footer));

    card
}

fn field(icon: &str, label: &str, value: &str) -> String {
    format!("{} <b>{}</b>\n<pre>   {}   </pre>\n", icon, label, escape(value))
}

fn dollar(formatted: String) -> String {
    format!("${}", formatted)
}

/// Inline controls under the card: comparison callbacks, chart callbacks,
/// and the DexScreener link.
pub fn build_keyboard(pair: &Pair) -> InlineKeyboardMarkup {
    let address = &pair.base_token.address;

    let mut rows = vec![
        vec![
            InlineKeyboardButton::callback(
                "📊 Compare Price",
                CallbackAction::ComparePrice {
                    address: address.clone(),
                }
                .encode(),
            ),
            InlineKeyboardButton::callback(
                "🐋 Compare MCap",
                CallbackAction::CompareMarketCap {
                    address: address.clone(),
                }
                .encode(),
            ),
        ],
        vec![
            InlineKeyboardButton::callback(
                "🕐 1h Chart",
                CallbackAction::Chart {
                    address: address.clone(),
                    timeframe: ChartTimeframe::Hour,
                }
                .encode(),
            ),
            InlineKeyboardButton::callback(
                "📅 1d Chart",
                CallbackAction::Chart {
                    address: address.clone(),
                    timeframe: ChartTimeframe::Day,
                }
                .encode(),
            ),
        ],
    ];

    if let Ok(url) = reqwest::Url::parse(&pair.url) {
        rows.push(vec![InlineKeyboardButton::url(
            "🔍 View on DexScreener",
            url,
        )]);
    }

    InlineKeyboardMarkup::new(rows)
}
