//! Price chart replies. Rendering stays external: a QuickChart URL is built
//! from the close series and Telegram fetches the image itself.

use anyhow::Result;
use chrono::{TimeZone, Utc};
use teloxide::{prelude::*, sugar::request::RequestReplyExt, types::InputFile};

use crate::compare::dto::ChartTimeframe;
use crate::dependencies::BotDependencies;
use crate::geckoterminal::{Candle, network_for_chain};

// Enough history for a readable line without blowing up the URL.
const CHART_CANDLES: u32 = 60;
const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 400;
const CHART_LINE_COLOR: &str = "#00D4AA";

pub async fn send_chart(
    bot: &Bot,
    message: &teloxide::types::Message,
    bot_deps: &BotDependencies,
    address: &str,
    timeframe: ChartTimeframe,
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
            log::error!("Chart token lookup failed: {}", error);
            bot.send_message(
                message.chat.id,
                "❌ Failed to fetch token data. Please try again later.",
            )
            .reply_to(message.id)
            .await?;
            return Ok(());
        }
    };

    let Some(network) = network_for_chain(&pair.chain_id) else {
        bot.send_message(
            message.chat.id,
            format!("😕 Charts are not available for the {} network.", pair.chain_id),
        )
        .reply_to(message.id)
        .await?;
        return Ok(());
    };

    let pool = match bot_deps
        .gecko
        .top_pool_for_token(network, &pair.base_token.address)
        .await
    {
        Ok(Some(pool)) => pool,
        Ok(None) => pair.pair_address.clone(),
        Err(error) => {
            log::warn!(
                "Pool lookup failed, falling back to the DexScreener pair address: {}",
                error
            );
            pair.pair_address.clone()
        }
    };

    let candles = match bot_deps
        .gecko
        .fetch_ohlcv(network, &pool, timeframe.api_segment(), CHART_CANDLES)
        .await
    {
        Ok(candles) => candles,
        Err(error) => {
            log::error!("OHLCV fetch failed for pool {}: {}", pool, error);
            bot.send_message(
                message.chat.id,
                "❌ Failed to fetch chart data. Please try again later.",
            )
            .reply_to(message.id)
            .await?;
            return Ok(());
        }
    };

    if candles.is_empty() {
        bot.send_message(message.chat.id, "😕 No chart data available for this pool yet.")
            .reply_to(message.id)
            .await?;
        return Ok(());
    }

    let title = format!(
        "{} ({}) - {} Chart",
        pair.base_token.name,
        pair.base_token.symbol,
        timeframe.label()
    );
    let chart_url = build_chart_url(&candles, &title);

    bot.send_photo(message.chat.id, InputFile::url(reqwest::Url::parse(&chart_url)?))
        .caption(format!("📈 {}", title))
        .reply_to(message.id)
        .await?;

    Ok(())
}

/// Close-price line chart as a QuickChart request URL.
fn build_chart_url(candles: &[Candle], title: &str) -> String {
    let labels: Vec<String> = candles
        .iter()
        .map(|candle| {
            Utc.timestamp_opt(candle.timestamp, 0)
                .single()
                .map(|ts| ts.format("%m-%d %H:%M").to_string())
                .unwrap_or_default()
        })
        .collect();
    let closes: Vec<f64> = candles.iter().map(|candle| candle.close).collect();

    let config = serde_json::json!({
        "type": "line",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": "Close Price",
                "data": closes,
                "borderColor": CHART_LINE_COLOR,
                "backgroundColor": "rgba(0, 212, 170, 0.1)",
                "borderWidth": 2,
                "fill": false,
                "pointRadius": 0
            }]
        },
        "options": {
            "plugins": {
                "title": { "display": true, "text": title },
                "legend": { "display": false }
            }
        }
    });

    format!(
        "https://quickchart.io/chart?w={}&h={}&c={}",
        CHART_WIDTH,
        CHART_HEIGHT,
        urlencoding::encode(&config.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_url_embeds_title_and_series() {
        let candles = vec![
            Candle {
                timestamp: 1_700_000_000,
                open: 1.0,
                high: 1.2,
                low: 0.9,
                close: 1.1,
                volume: 100.0,
            },
            Candle {
                timestamp: 1_700_003_600,
                open: 1.1,
                high: 1.3,
                low: 1.0,
                close: 1.2,
                volume: 150.0,
            },
        ];

        let url = build_chart_url(&candles, "Test Token (TEST) - 1h Chart");
        assert!(url.starts_with("https://quickchart.io/chart?w=800&h=400&c="));

        let decoded = urlencoding::decode(url.split("c=").nth(1).unwrap()).unwrap();
        assert!(decoded.contains("Test Token (TEST) - 1h Chart"));
        assert!(decoded.contains("1.1"));
        assert!(decoded.contains("1.2"));
        assert!(reqwest::Url::parse(&url).is_ok());
    }
}
