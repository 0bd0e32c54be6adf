/// An interactive control under a token card, decoded once from the raw
/// callback data at the dispatch boundary. Handlers never inspect the wire
/// string again after this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    ComparePrice { address: String },
    CompareMarketCap { address: String },
    Chart { address: String, timeframe: ChartTimeframe },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTimeframe {
    Hour,
    Day,
}

impl ChartTimeframe {
    /// Path segment of the GeckoTerminal OHLCV endpoint.
    pub fn api_segment(self) -> &'static str {
        match self {
            ChartTimeframe::Hour => "hour",
            ChartTimeframe::Day => "day",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartTimeframe::Hour => "1h",
            ChartTimeframe::Day => "1d",
        }
    }
}

impl CallbackAction {
    /// Wire form for callback data. Telegram caps callback data at 64
    /// bytes; the longest prefix plus a 44 character address stays inside.
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::ComparePrice { address } => format!("cmp_price:{}", address),
            CallbackAction::CompareMarketCap { address } => format!("cmp_mcap:{}", address),
            CallbackAction::Chart {
                address,
                timeframe: ChartTimeframe::Hour,
            } => format!("chart_hour:{}", address),
            CallbackAction::Chart {
                address,
                timeframe: ChartTimeframe::Day,
            } => format!("chart_day:{}", address),
        }
    }

    pub fn decode(data: &str) -> Option<Self> {
        let (tag, address) = data.split_once(':')?;
        if address.is_empty() {
            return None;
        }
        let address = address.to_string();

        match tag {
            "cmp_price" => Some(CallbackAction::ComparePrice { address }),
            "cmp_mcap" => Some(CallbackAction::CompareMarketCap { address }),
            "chart_hour" => Some(CallbackAction::Chart {
                address,
                timeframe: ChartTimeframe::Hour,
            }),
            "chart_day" => Some(CallbackAction::Chart {
                address,
                timeframe: ChartTimeframe::Day,
            }),
            _ => None,
        }
    }
}
