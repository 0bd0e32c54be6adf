use anyhow::Result;

use crate::dexscreener::dto::{Pair, SearchResponse};

const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

/// Client for the DexScreener search API.
#[derive(Clone)]
pub struct DexScreener {
    client: reqwest::Client,
    base_url: String,
}

impl DexScreener {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEXSCREENER_BASE_URL.to_string())
    }

    pub fn with_base_url(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Look a token up by contract address (or any search query) and return
    /// the top-ranked pair, or `None` when DexScreener knows nothing.
    pub async fn search_pair(&self, query: &str) -> Result<Option<Pair>> {
        let url = format!(
            "{}/latest/dex/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("DexScreener request failed: {}", status);
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.pairs.unwrap_or_default().into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pair_payload() -> serde_json::Value {
        json!({
            "pairs": [{
                "chainId": "ethereum",
                "dexId": "uniswap",
                "pairAddress": "0xpool",
                "url": "https://dexscreener.com/ethereum/0xpool",
                "baseToken": {
                    "address": "0x1111111111111111111111111111111111111111",
                    "name": "Test Token",
                    "symbol": "TEST"
                },
                "priceUsd": "0.0042",
                "marketCap": 1_500_000.0,
                "fdv": 2_000_000.0,
                "liquidity": { "usd": 250_000.0 },
                "volume": { "h24": 80_000.0 },
                "priceChange": { "h1": 1.2, "h24": -5.4 },
                "txns": { "h24": { "buys": 120, "sells": 80 } }
            }]
        })
    }

    #[tokio::test]
    async fn returns_top_pair_when_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest/dex/search"))
            .and(query_param("q", "0x1111111111111111111111111111111111111111"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pair_payload()))
            .mount(&server)
            .await;

        let client = DexScreener::with_base_url(reqwest::Client::new(), server.uri());
        let pair = client
            .search_pair("0x1111111111111111111111111111111111111111")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(pair.base_token.symbol, "TEST");
        assert_eq!(pair.price_usd(), Some(0.0042));
        assert_eq!(pair.market_cap, Some(1_500_000.0));
        assert_eq!(pair.liquidity_usd(), Some(250_000.0));
        assert_eq!(pair.txns_h24(), (120, 80));
    }

    #[tokio::test]
    async fn empty_pair_list_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest/dex/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pairs": [] })))
            .mount(&server)
            .await;

        let client = DexScreener::with_base_url(reqwest::Client::new(), server.uri());
        assert!(client.search_pair("whatever").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_pairs_field_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest/dex/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pairs": null })))
            .mount(&server)
            .await;

        let client = DexScreener::with_base_url(reqwest::Client::new(), server.uri());
        assert!(client.search_pair("whatever").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_error_surfaces_as_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest/dex/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = DexScreener::with_base_url(reqwest::Client::new(), server.uri());
        assert!(client.search_pair("whatever").await.is_err());
    }
}
