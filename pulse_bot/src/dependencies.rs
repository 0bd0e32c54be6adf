use crate::{
    coingecko::handler::CoinGecko, config::BotConfig, dexscreener::handler::DexScreener,
    geckoterminal::handler::GeckoTerminal,
};

/// Everything a handler needs, cloned into each dispatch.
#[derive(Clone)]
pub struct BotDependencies {
    pub dexscreener: DexScreener,
    pub coingecko: CoinGecko,
    pub gecko: GeckoTerminal,
    pub config: BotConfig,
}

impl BotDependencies {
    pub fn from_env() -> Self {
        let client = reqwest::Client::new();

        Self {
            dexscreener: DexScreener::new(client.clone()),
            coingecko: CoinGecko::new(client.clone()),
            gecko: GeckoTerminal::new(client),
            config: BotConfig::from_env(),
        }
    }
}
