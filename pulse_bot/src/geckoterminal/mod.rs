pub mod dto;
pub mod handler;

// Re-export commonly used types from dto module
pub use dto::{
    Candle, GECKO_MAX_RETRIES, GECKO_RETRY_BASE_DELAY_MS, GeckoPayloadState, GeckoRequestError,
    network_for_chain,
};
