//! Integration test: CoinGeckoFeed <-> mock HTTP provider
//!
//! Covers the success path and every degradation the game must survive.

use codex_gateway::CoinGeckoFeed;
use codex_ports::{FeedError, PriceFeed};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetches_reference_price() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/simple/price"))
        .and(query_param("ids", "bitcoin"))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {"usd": 98765.43}})))
        .expect(1)
        .mount(&server)
        .await;

    let feed = CoinGeckoFeed::new().with_base_url(server.uri());
    let price = feed.reference_price().await.unwrap();
    assert_eq!(price, dec!(98765.43));
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let feed = CoinGeckoFeed::new().with_base_url(server.uri());
    assert_eq!(
        feed.reference_price().await,
        Err(FeedError::Api { status: 429 })
    );
}

#[tokio::test]
async fn test_unexpected_body_is_a_parse_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let feed = CoinGeckoFeed::new().with_base_url(server.uri());
    assert!(matches!(
        feed.reference_price().await,
        Err(FeedError::Parse(_))
    ));
}

#[tokio::test]
async fn test_missing_asset_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let feed = CoinGeckoFeed::new().with_base_url(server.uri());
    assert!(matches!(
        feed.reference_price().await,
        Err(FeedError::MissingPrice(_))
    ));
}

#[tokio::test]
async fn test_unreachable_host_is_a_network_failure() {
    // Nothing listens on port 9 of localhost
    let feed = CoinGeckoFeed::new().with_base_url("http://127.0.0.1:9");
    assert!(matches!(
        feed.reference_price().await,
        Err(FeedError::Network(_))
    ));
}
