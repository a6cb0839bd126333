mod coingecko;
mod fixed;

pub use coingecko::{COINGECKO_BASE_URL, CoinGeckoFeed};
pub use fixed::FixedPriceFeed;
