use anyhow::Result;
use regex::Regex;
use teloxide::{prelude::*, sugar::request::RequestReplyExt, types::ParseMode};

use crate::dependencies::BotDependencies;
use crate::token_query::helpers::{build_keyboard, build_token_card};

/// Watch inbound text for a contract address and answer with a summary card.
/// Messages without a recognizable address are ignored silently.
pub async fn handle_message(bot: Bot, msg: Message, bot_deps: BotDependencies) -> Result<()> {
    if msg.from.as_ref().map(|user| user.is_bot).unwrap_or(false) {
        return Ok(());
    }
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(address) = extract_contract_address(text) else {
        return Ok(());
    };

    match bot_deps.dexscreener.search_pair(&address).await {
        Ok(Some(pair)) => {
            let card = build_token_card(&pair, &bot_deps.config.footer_text);
            bot.send_message(msg.chat.id, card)
                .parse_mode(ParseMode::Html)
                .reply_markup(build_keyboard(&pair))
                .reply_to(msg.id)
                .await?;
        }
        Ok(None) => {
            bot.send_message(msg.chat.id, "🚫 Token not found.")
                .reply_to(msg.id)
                .await?;
        }
        Err(error) => {
            log::error!("Error processing token query: {}", error);
            bot.send_message(
                msg.chat.id,
                "❌ Failed to fetch token data. Please try again later.",
            )
            .reply_to(msg.id)
            .await?;
        }
    }

    Ok(())
}

/// First EVM (0x + 40 hex) or base58-shaped (32 to 44 alphanumerics)
/// contract address in the text.
pub fn extract_contract_address(text: &str) -> Option<String> {
    let re = Regex::new(r"\b(0x[a-fA-F0-9]{40}|[A-Za-z0-9]{32,44})\b").unwrap();
    re.find(text).map(|m| m.as_str().to_string())
}
