use anyhow::Result;
use chrono::Utc;
use pulse_core::{Snapshot, compare_snapshots, format_compact, format_price};
use teloxide::{
    prelude::*,
    sugar::request::RequestReplyExt,
    types::{MaybeInaccessibleMessage, Message, ParseMode},
    utils::html::escape,
};

use crate::chart;
use crate::compare::dto::CallbackAction;
use crate::dependencies::BotDependencies;
use crate::dexscreener::dto::Pair;
use crate::token_query::helpers::{FIELD_MARKET_CAP, FIELD_PRICE};

/// Which figure a comparison control targets.
#[derive(Debug, Clone, Copy)]
enum ComparisonKind {
    Price,
    MarketCap,
}

impl ComparisonKind {
    fn field_label(self) -> &'static str {
        match self {
            ComparisonKind::Price => FIELD_PRICE,
            ComparisonKind::MarketCap => FIELD_MARKET_CAP,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ComparisonKind::Price => "Price",
            ComparisonKind::MarketCap => "Market Cap",
        }
    }

    fn current_value(self, pair: &Pair) -> Option<f64> {
        match self {
            ComparisonKind::Price => pair.price_usd(),
            ComparisonKind::MarketCap => pair.market_cap,
        }
    }

    fn render(self, value: Option<f64>) -> String {
        match self {
            ComparisonKind::Price => format_price(value),
            ComparisonKind::MarketCap => format_compact(value),
        }
    }
}

/// Entry point for all callback queries. The raw data is decoded into a
/// [`CallbackAction`] here; unknown data is acknowledged and dropped.
pub async fn handle_callback(bot: Bot, query: CallbackQuery, bot_deps: BotDependencies) -> Result<()> {
    let data = query.data.as_deref().unwrap_or("");
    let Some(action) = CallbackAction::decode(data) else {
        bot.answer_callback_query(query.id).await?;
        return Ok(());
    };

    let message = match &query.message {
        Some(MaybeInaccessibleMessage::Regular(message)) => message,
        _ => {
            bot.answer_callback_query(query.id)
                .text("❌ The original card is no longer available.")
                .await?;
            return Ok(());
        }
    };

    bot.answer_callback_query(query.id).await?;

    match action {
        CallbackAction::ComparePrice { address } => {
            run_comparison(&bot, message, &bot_deps, &address, ComparisonKind::Price).await
        }
        CallbackAction::CompareMarketCap { address } => {
            run_comparison(&bot, message, &bot_deps, &address, ComparisonKind::MarketCap).await
        }
        CallbackAction::Chart { address, timeframe } => {
            chart::send_chart(&bot, message, &bot_deps, &address, timeframe).await
        }
    }
}

/// Fetch the current figure, recover the original from the card the button
/// hangs off, and reply with the rendered delta. Every failure path still
/// produces a reply.
async fn run_comparison(
    bot: &Bot,
    message: &Message,
    bot_deps: &BotDependencies,
    address: &str,
    kind: ComparisonKind,
) -> Result<()> {
    let pair = match bot_deps.dexscreener.search_pair(address).await {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            bot.send_message(message.chat.id, "🚫 Token not found on DexScreener anymore.")
                .reply_to(message.id)
                .await?;
            return Ok(());
        }
        Err(error) => {
            log::error!("Comparison fetch failed: {}", error);
            bot.send_message(
                message.chat.id,
                "❌ Failed to fetch current token data. Please try again later.",
            )
            .reply_to(message.id)
            .await?;
            return Ok(());
        }
    };

    // DexScreener first, CoinGecko as a fallback source for the live figure.
    let mut current_value = kind.current_value(&pair);
    if current_value.is_none() {
        current_value = bot_deps
            .coingecko
            .current_price(&pair.base_token.address, &pair.chain_id)
            .await
            .and_then(|live| match kind {
                ComparisonKind::Price => live.price,
                ComparisonKind::MarketCap => live.market_cap,
            });
    }
    let current = Snapshot::new(current_value.unwrap_or(0.0), Utc::now());

    // The card this button hangs off is the only durable record of the
    // original figure; its text is re-parsed rather than looked up.
    let rendered_original = message.text().or_else(|| message.caption()).unwrap_or("");

    // Optional higher-precision baseline from CoinGecko at the day the card
    // was posted. Absence never blocks the comparison.
    let historical = bot_deps
        .coingecko
        .historical_price(&pair.base_token.address, &pair.chain_id, message.date)
        .await;
    let override_value = historical.and_then(|snapshot| match kind {
        ComparisonKind::Price => snapshot.price,
        ComparisonKind::MarketCap => snapshot.market_cap,
    });

    let outcome = compare_snapshots(
        rendered_original,
        kind.field_label(),
        &current,
        override_value,
    );

    let text = format!(
        "<b>📊 {} ({}) {} comparison</b>\nSince {}\n\n{}\n\nNow: ${}",
        escape(&pair.base_token.name),
        escape(&pair.base_token.symbol),
        kind.title(),
        message.date.format("%Y-%m-%d %H:%M UTC"),
        outcome.display,
        kind.render(current_value)
    );

    bot.send_message(message.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_to(message.id)
        .await?;

    Ok(())
}
