use async_trait::async_trait;
use codex_core::Price;

use crate::error::FeedResult;

/// Port for the external reference price provider
///
/// Queried once at boot. Any failure leaves the game on its default
/// reference price.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the current price of the reference asset
    async fn reference_price(&self) -> FeedResult<Price>;

    /// Get the feed's name/identifier for debugging
    fn name(&self) -> &str {
        "PriceFeed"
    }
}
