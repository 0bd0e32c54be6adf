/// Daily snapshot from the CoinGecko history endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalPrice {
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
}

/// Live figures from the CoinGecko simple token-price endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentPrice {
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub change_24h: Option<f64>,
}

/// Map a DexScreener chain id to the CoinGecko asset-platform id.
pub fn platform_for_chain(chain_id: &str) -> Option<&'static str> {
    match chain_id.to_lowercase().as_str() {
        "ethereum" => Some("ethereum"),
        "bsc" => Some("binance-smart-chain"),
        "polygon" => Some("polygon-pos"),
        "arbitrum" => Some("arbitrum-one"),
        "optimism" => Some("optimistic-ethereum"),
        "base" => Some("base"),
        "avalanche" => Some("avalanche"),
        "solana" => Some("solana"),
        _ => None,
    }
}
