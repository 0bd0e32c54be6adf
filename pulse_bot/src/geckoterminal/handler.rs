//! GeckoTerminal client for pool discovery and OHLCV history, with bounded
//! retry/backoff around the free-tier rate limits.

use reqwest::StatusCode;
use tokio::time::{Duration, sleep};

use crate::geckoterminal::dto::{
    Candle, GECKO_MAX_RETRIES, GECKO_RETRY_BASE_DELAY_MS, GeckoPayloadState, GeckoRequestError,
};

const GECKOTERMINAL_BASE_URL: &str = "https://api.geckoterminal.com";

#[derive(Clone)]
pub struct GeckoTerminal {
    client: reqwest::Client,
    base_url: String,
}

impl GeckoTerminal {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, GECKOTERMINAL_BASE_URL.to_string())
    }

    pub fn with_base_url(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch OHLCV candles for a pool. `timeframe` is an API path segment
    /// (`minute`, `hour`, `day`). Returns oldest-first.
    pub async fn fetch_ohlcv(
        &self,
        network: &str,
        pool_address: &str,
        timeframe: &str,
        limit: u32,
    ) -> Result<Vec<Candle>, GeckoRequestError> {
        let url = format!(
            "{}/api/v2/networks/{}/pools/{}/ohlcv/{}?limit={}",
            self.base_url, network, pool_address, timeframe, limit
        );

        let data = self.send_request(&url).await?;
        let list = data
            .get("data")
            .and_then(|d| d.get("attributes"))
            .and_then(|a| a.get("ohlcv_list"))
            .and_then(|l| l.as_array());

        let Some(list) = list else {
            return Ok(Vec::new());
        };

        // Entries are [timestamp, open, high, low, close, volume], newest first.
        let mut candles: Vec<Candle> = list
            .iter()
            .filter_map(|item| {
                let entry = item.as_array()?;
                let number = |i: usize| entry.get(i).and_then(|v| v.as_f64());
                Some(Candle {
                    timestamp: entry.first().and_then(|v| v.as_i64())?,
                    open: number(1)?,
                    high: number(2)?,
                    low: number(3)?,
                    close: number(4)?,
                    volume: number(5).unwrap_or(0.0),
                })
            })
            .collect();
        candles.sort_by_key(|c| c.timestamp);

        Ok(candles)
    }

    /// Address of the first (highest-ranked) pool trading a token, or `None`
    /// when GeckoTerminal lists no pools for it.
    pub async fn top_pool_for_token(
        &self,
        network: &str,
        token_address: &str,
    ) -> Result<Option<String>, GeckoRequestError> {
        let url = format!(
            "{}/api/v2/networks/{}/tokens/{}/pools",
            self.base_url, network, token_address
        );

        let data = self.send_request(&url).await?;
        match classify_payload(&data) {
            GeckoPayloadState::Populated => {}
            GeckoPayloadState::Empty | GeckoPayloadState::Missing => return Ok(None),
        }

        let address = data
            .get("data")
            .and_then(|d| d.as_array())
            .and_then(|pools| pools.first())
            .and_then(|pool| pool.get("attributes"))
            .and_then(|attributes| attributes.get("address"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Ok(address)
    }

    /// Execute a request with retry/backoff and return the parsed JSON body.
    /// Retries on network failures, 5xx, 429, an API `errors` payload and
    /// unparseable JSON, with a linearly growing delay between attempts.
    async fn send_request(&self, url: &str) -> Result<serde_json::Value, GeckoRequestError> {
        let mut attempt = 0;
        loop {
            let attempt_number = attempt + 1;
            match self
                .client
                .get(url)
                .header("Accept", "application/json")
                .header("User-Agent", "tokenpulse/0.1")
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    let body = match response.text().await {
                        Ok(body) => body,
                        Err(error) => {
                            if attempt_number >= GECKO_MAX_RETRIES {
                                log::error!(
                                    "Failed to read GeckoTerminal response after {} attempts: {} (url: {})",
                                    attempt_number,
                                    error,
                                    url
                                );
                                return Err(GeckoRequestError::ResponseRead(error));
                            }
                            self.backoff(attempt_number).await;
                            attempt += 1;
                            continue;
                        }
                    };

                    if !status.is_success() {
                        let should_retry =
                            status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
                        if should_retry && attempt_number < GECKO_MAX_RETRIES {
                            log::warn!(
                                "GeckoTerminal returned status {} on attempt {}, retrying",
                                status,
                                attempt_number
                            );
                            self.backoff(attempt_number).await;
                            attempt += 1;
                            continue;
                        }

                        log::error!(
                            "GeckoTerminal request failed with status {} after {} attempts (url: {})",
                            status,
                            attempt_number,
                            url
                        );
                        return Err(GeckoRequestError::Http { status, body });
                    }

                    match serde_json::from_str::<serde_json::Value>(&body) {
                        Ok(json) => {
                            if let Some(messages) = api_error_messages(&json) {
                                if attempt_number >= GECKO_MAX_RETRIES {
                                    log::error!(
                                        "GeckoTerminal API returned errors after {} attempts (url: {}): {:?}",
                                        attempt_number,
                                        url,
                                        messages
                                    );
                                    return Err(GeckoRequestError::Api(messages));
                                }
                                self.backoff(attempt_number).await;
                                attempt += 1;
                                continue;
                            }

                            return Ok(json);
                        }
                        Err(error) => {
                            if attempt_number >= GECKO_MAX_RETRIES {
                                log::error!(
                                    "Failed to parse GeckoTerminal JSON after {} attempts: {} (url: {})",
                                    attempt_number,
                                    error,
                                    url
                                );
                                return Err(GeckoRequestError::Parse(error));
                            }
                            self.backoff(attempt_number).await;
                            attempt += 1;
                            continue;
                        }
                    }
                }
                Err(error) => {
                    if attempt_number >= GECKO_MAX_RETRIES {
                        log::error!(
                            "GeckoTerminal request failed after {} attempts: {} (url: {})",
                            attempt_number,
                            error,
                            url
                        );
                        return Err(GeckoRequestError::Network(error));
                    }
                    log::warn!(
                        "GeckoTerminal request attempt {} failed: {}, retrying",
                        attempt_number,
                        error
                    );
                    self.backoff(attempt_number).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn backoff(&self, attempt_number: u32) {
        sleep(Duration::from_millis(
            GECKO_RETRY_BASE_DELAY_MS * attempt_number as u64,
        ))
        .await;
    }
}

/// Collect messages from a JSON:API `errors` array, if present.
fn api_error_messages(json: &serde_json::Value) -> Option<Vec<String>> {
    let errors = json.get("errors").and_then(|v| v.as_array())?;
    if errors.is_empty() {
        return None;
    }

    Some(
        errors
            .iter()
            .map(|error| {
                error
                    .get("detail")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
                    .or_else(|| {
                        error
                            .get("title")
                            .and_then(|v| v.as_str())
                            .map(|s| s.to_string())
                    })
                    .unwrap_or_else(|| error.to_string())
            })
            .collect(),
    )
}

/// Whether the payload's `data` field carries usable data.
fn classify_payload(data: &serde_json::Value) -> GeckoPayloadState {
    let Some(payload) = data.get("data") else {
        return GeckoPayloadState::Missing;
    };

    match payload {
        serde_json::Value::Null => GeckoPayloadState::Missing,
        serde_json::Value::Array(items) => {
            if items.is_empty() {
                GeckoPayloadState::Empty
            } else {
                GeckoPayloadState::Populated
            }
        }
        serde_json::Value::Object(map) => {
            if map.is_empty() {
                GeckoPayloadState::Empty
            } else {
                GeckoPayloadState::Populated
            }
        }
        _ => GeckoPayloadState::Populated,
    }
}
