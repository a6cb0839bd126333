use async_trait::async_trait;
use codex_core::Price;
use codex_ports::{FeedError, FeedResult, PriceFeed};

/// Price feed with a canned answer
///
/// Used offline and in tests; `failing()` models an unreachable provider.
#[derive(Debug, Clone)]
pub struct FixedPriceFeed {
    price: Option<Price>,
}

impl FixedPriceFeed {
    pub fn new(price: Price) -> Self {
        Self { price: Some(price) }
    }

    /// A feed whose every request fails
    pub fn failing() -> Self {
        Self { price: None }
    }
}

#[async_trait]
impl PriceFeed for FixedPriceFeed {
    async fn reference_price(&self) -> FeedResult<Price> {
        self.price
            .ok_or_else(|| FeedError::Network("fixed feed is offline".to_string()))
    }

    fn name(&self) -> &str {
        "FixedPriceFeed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_fixed_feed() {
        let feed = FixedPriceFeed::new(dec!(64000));
        assert_eq!(feed.reference_price().await.unwrap(), dec!(64000));
    }

    #[tokio::test]
    async fn test_failing_feed() {
        let feed = FixedPriceFeed::failing();
        assert!(matches!(
            feed.reference_price().await,
            Err(FeedError::Network(_))
        ));
    }
}
