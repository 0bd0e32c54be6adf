use reqwest::StatusCode;
use thiserror::Error;

pub const GECKO_MAX_RETRIES: u32 = 3;
pub const GECKO_RETRY_BASE_DELAY_MS: u64 = 500;

/// Terminal failure of a GeckoTerminal request after retries are exhausted.
#[derive(Debug, Error)]
pub enum GeckoRequestError {
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("failed to read response body: {0}")]
    ResponseRead(reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("API errors: {}", .0.join(" | "))]
    Api(Vec<String>),
    #[error("failed to parse response JSON: {0}")]
    Parse(serde_json::Error),
}

/// Whether a successful response actually carries usable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeckoPayloadState {
    Missing,
    Empty,
    Populated,
}

/// One OHLCV candle from a pool chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Map a DexScreener chain id to the GeckoTerminal network id.
pub fn network_for_chain(chain_id: &str) -> Option<&'static str> {
    match chain_id.to_lowercase().as_str() {
        "ethereum" => Some("eth"),
        "bsc" => Some("bsc"),
        "polygon" => Some("polygon_pos"),
        "arbitrum" => Some("arbitrum"),
        "optimism" => Some("optimism"),
        "base" => Some("base"),
        "avalanche" => Some("avax"),
        "solana" => Some("solana"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_networks() {
        assert_eq!(network_for_chain("ethereum"), Some("eth"));
        assert_eq!(network_for_chain("Avalanche"), Some("avax"));
        assert_eq!(network_for_chain("polygon"), Some("polygon_pos"));
    }

    #[test]
    fn unknown_network_is_none() {
        assert_eq!(network_for_chain("near"), None);
    }
}
