use serde::Deserialize;

/// Response of `/latest/dex/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub pairs: Option<Vec<Pair>>,
}

/// A trading pair as DexScreener reports it. Every market figure is optional;
/// missing values flow through the formatter as the `"N/A"` sentinel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub chain_id: String,
    pub pair_address: String,
    pub url: String,
    pub base_token: BaseToken,
    /// Price comes back as a string from the API.
    pub price_usd: Option<String>,
    pub market_cap: Option<f64>,
    pub fdv: Option<f64>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub volume: Option<VolumeWindows>,
    #[serde(default)]
    pub price_change: Option<ChangeWindows>,
    #[serde(default)]
    pub txns: Option<TxnWindows>,
}

impl Pair {
    pub fn price_usd(&self) -> Option<f64> {
        self.price_usd.as_deref().and_then(|p| p.parse().ok())
    }

    pub fn liquidity_usd(&self) -> Option<f64> {
        self.liquidity.as_ref().and_then(|l| l.usd)
    }

    pub fn volume_h24(&self) -> Option<f64> {
        self.volume.as_ref().and_then(|v| v.h24)
    }

    pub fn change_h1(&self) -> Option<f64> {
        self.price_change.as_ref().and_then(|c| c.h1)
    }

    pub fn change_h24(&self) -> Option<f64> {
        self.price_change.as_ref().and_then(|c| c.h24)
    }

    /// 24h buy/sell counts, zero when the window is absent.
    pub fn txns_h24(&self) -> (u64, u64) {
        self.txns
            .as_ref()
            .and_then(|t| t.h24.as_ref())
            .map(|w| (w.buys, w.sells))
            .unwrap_or((0, 0))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Liquidity {
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeWindows {
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeWindows {
    pub h1: Option<f64>,
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxnWindows {
    pub h24: Option<TxnCounts>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxnCounts {
    #[serde(default)]
    pub buys: u64,
    #[serde(default)]
    pub sells: u64,
}
