use async_trait::async_trait;
use codex_core::Price;
use codex_ports::{FeedResult, PriceFeed};
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Duration;

use crate::error::RestError;

/// Public CoinGecko API root
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reference price from CoinGecko's simple price endpoint
///
/// `GET /api/v3/simple/price?ids=bitcoin&vs_currencies=usd` answers
/// `{"bitcoin": {"usd": 67012.0}}`.
#[derive(Clone)]
pub struct CoinGeckoFeed {
    client: Client,
    base_url: String,
    asset: String,
    currency: String,
}

impl CoinGeckoFeed {
    /// Bitcoin priced in US dollars
    pub fn new() -> Self {
        Self::for_pair("bitcoin", "usd")
    }

    pub fn for_pair(asset: impl Into<String>, currency: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: COINGECKO_BASE_URL.to_string(),
            asset: asset.into(),
            currency: currency.into(),
        }
    }

    /// Point at another host (mirrors, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch(&self) -> Result<Price, RestError> {
        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies={}",
            self.base_url, self.asset, self.currency
        );
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RestError::Status(status.as_u16()));
        }

        let body: Value = resp.json().await?;
        let price = parse_price(&body, &self.asset, &self.currency)?;
        debug!("{} price in {}: {}", self.asset, self.currency, price);
        Ok(price)
    }
}

impl Default for CoinGeckoFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract `body[asset][currency]` as a positive decimal
pub fn parse_price(body: &Value, asset: &str, currency: &str) -> Result<Price, RestError> {
    let path = format!("{asset}.{currency}");
    let raw = body
        .get(asset)
        .and_then(|a| a.get(currency))
        .ok_or_else(|| RestError::Missing(path.clone()))?;

    let price = raw
        .as_f64()
        .and_then(Decimal::from_f64_retain)
        .ok_or_else(|| RestError::Parse(format!("{path} is not a number: {raw}")))?
        .round_dp(2);

    if price <= Decimal::ZERO {
        return Err(RestError::Parse(format!("{path} is not positive: {price}")));
    }
    Ok(price)
}

#[async_trait]
impl PriceFeed for CoinGeckoFeed {
    async fn reference_price(&self) -> FeedResult<Price> {
        Ok(self.fetch().await?)
    }

    fn name(&self) -> &str {
        "CoinGeckoFeed"
    }
}
