//! CoinGecko client for the optional higher-precision historical figures.
//! Every failure degrades to `None`; a comparison must still render when
//! CoinGecko has nothing for the token.

use chrono::{DateTime, Utc};

use crate::coingecko::dto::{CurrentPrice, HistoricalPrice, platform_for_chain};

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com";

#[derive(Clone)]
pub struct CoinGecko {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGecko {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, COINGECKO_BASE_URL.to_string())
    }

    pub fn with_base_url(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Daily price/market-cap snapshot for the day of `at`. `None` when the
    /// chain is unsupported, the token is unknown to CoinGecko, or the
    /// request fails for any reason.
    pub async fn historical_price(
        &self,
        contract_address: &str,
        chain_id: &str,
        at: DateTime<Utc>,
    ) -> Option<HistoricalPrice> {
        let platform = match platform_for_chain(chain_id) {
            Some(platform) => platform,
            None => {
                log::info!("Unsupported chain for CoinGecko history: {}", chain_id);
                return None;
            }
        };

        // The history endpoint wants dd-mm-yyyy.
        let url = format!(
            "{}/api/v3/coins/{}/contract/{}/history?date={}&localization=false",
            self.base_url,
            platform,
            contract_address,
            at.format("%d-%m-%Y")
        );

        let data = self.fetch_json(&url).await?;
        let market_data = data.get("market_data")?;

        Some(HistoricalPrice {
            price: market_data
                .get("current_price")
                .and_then(|p| p.get("usd"))
                .and_then(|v| v.as_f64()),
            market_cap: market_data
                .get("market_cap")
                .and_then(|m| m.get("usd"))
                .and_then(|v| v.as_f64()),
        })
    }

    /// Live price figures for a token contract, `None` on any failure.
    pub async fn current_price(
        &self,
        contract_address: &str,
        chain_id: &str,
    ) -> Option<CurrentPrice> {
        let platform = platform_for_chain(chain_id)?;

        let url = format!(
            "{}/api/v3/simple/token_price/{}?contract_addresses={}&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true&include_24hr_change=true",
            self.base_url,
            platform,
            urlencoding::encode(contract_address)
        );

        let data = self.fetch_json(&url).await?;
        let entry = data.get(contract_address.to_lowercase().as_str())?;

        Some(CurrentPrice {
            price: entry.get("usd").and_then(|v| v.as_f64()),
            market_cap: entry.get("usd_market_cap").and_then(|v| v.as_f64()),
            volume_24h: entry.get("usd_24h_vol").and_then(|v| v.as_f64()),
            change_24h: entry.get("usd_24h_change").and_then(|v| v.as_f64()),
        })
    }

    async fn fetch_json(&self, url: &str) -> Option<serde_json::Value> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(error) => {
                log::warn!("CoinGecko request failed: {} (url: {})", error, url);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND {
                log::info!("CoinGecko has no data at {}", url);
            } else {
                log::warn!("CoinGecko returned status {} (url: {})", status, url);
            }
            return None;
        }

        match response.json::<serde_json::Value>().await {
            Ok(json) => Some(json),
            Err(error) => {
                log::warn!("Failed to parse CoinGecko response: {} (url: {})", error, url);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn historical_price_reads_market_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/api/v3/coins/ethereum/contract/0xabc/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "market_data": {
                    "current_price": { "usd": 0.5 },
                    "market_cap": { "usd": 1_000_000.0 }
                }
            })))
            .mount(&server)
            .await;

        let client = CoinGecko::with_base_url(reqwest::Client::new(), server.uri());
        let snapshot = client
            .historical_price("0xabc", "ethereum", Utc::now())
            .await
            .unwrap();

        assert_eq!(snapshot.price, Some(0.5));
        assert_eq!(snapshot.market_cap, Some(1_000_000.0));
    }

    #[tokio::test]
    async fn missing_market_data_degrades_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "something" })))
            .mount(&server)
            .await;

        let client = CoinGecko::with_base_url(reqwest::Client::new(), server.uri());
        assert!(
            client
                .historical_price("0xabc", "ethereum", Utc::now())
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn not_found_degrades_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/history"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = CoinGecko::with_base_url(reqwest::Client::new(), server.uri());
        assert!(
            client
                .historical_price("0xabc", "ethereum", Utc::now())
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn unsupported_chain_skips_the_request() {
        let client = CoinGecko::with_base_url(reqwest::Client::new(), "http://127.0.0.1:1".into());
        assert!(
            client
                .historical_price("0xabc", "tron", Utc::now())
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn current_price_keys_by_lowercased_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/api/v3/simple/token_price/ethereum"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "0xabc": {
                    "usd": 1.25,
                    "usd_market_cap": 5_000_000.0,
                    "usd_24h_vol": 300_000.0,
                    "usd_24h_change": -2.5
                }
            })))
            .mount(&server)
            .await;

        let client = CoinGecko::with_base_url(reqwest::Client::new(), server.uri());
        let current = client.current_price("0xABC", "ethereum").await.unwrap();

        assert_eq!(current.price, Some(1.25));
        assert_eq!(current.market_cap, Some(5_000_000.0));
        assert_eq!(current.change_24h, Some(-2.5));
    }
}
