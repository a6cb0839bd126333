//! Codex Gateway
//!
//! Gateway layer for the Codex idle game: adapters for the external
//! reference price provider.
//!
//! ## Architecture
//!
//! ```text
//! External World (CoinGecko)
//!         │ one request at boot
//!    ┌────▼─────┐
//!    │ PriceFeed│  CoinGeckoFeed / FixedPriceFeed
//!    └────┬─────┘
//!         │ reference price (or FeedError)
//!    ┌────▼────┐
//!    │  Game   │  keeps its default rate on any failure
//!    └─────────┘
//! ```

pub mod error;
pub mod feeds;

// Re-export commonly used types
pub use error::RestError;
pub use feeds::{COINGECKO_BASE_URL, CoinGeckoFeed, FixedPriceFeed};
