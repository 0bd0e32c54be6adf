//! Pure computation core for the tokenpulse bot: compact number formatting,
//! lossy re-parsing of rendered values, and price-delta math. No I/O here:
//! every function is total over its documented input domain and safe to call
//! from any number of handler tasks at once.

pub mod compare;
pub mod delta;
pub mod format;
pub mod parse;
pub mod snapshot;

// Re-export the types handlers reach for most often.
pub use compare::{Comparison, compare_snapshots};
pub use delta::{PriceDelta, Trend, format_delta, format_multiplier, market_trend};
pub use format::{format_compact, format_percent, format_price};
pub use parse::parse_compact;
pub use snapshot::{Snapshot, recall_rendered_value};
