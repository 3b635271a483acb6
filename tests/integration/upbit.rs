//! Integration tests for the Upbit REST provider

use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use sepascan::services::market_data::{FetchError, MarketDataProvider};
use sepascan::services::upbit::UpbitProvider;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn day_stamp(i: usize) -> String {
    let day = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap() + Duration::days(i as i64);
    day.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Candles for day indices `days`, in the order given (Upbit sends them
/// newest first).
fn candle_body(symbol: &str, days: impl Iterator<Item = usize>) -> Value {
    let rows: Vec<Value> = days
        .map(|i| {
            let close = 100.0 + i as f64;
            json!({
                "market": symbol,
                "candle_date_time_utc": day_stamp(i),
                "opening_price": close - 1.0,
                "high_price": close + 1.0,
                "low_price": close - 2.0,
                "trade_price": close,
                "candle_acc_trade_volume": 1000.0 + i as f64,
            })
        })
        .collect();
    Value::Array(rows)
}

#[tokio::test]
async fn lists_only_krw_markets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/market/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "market": "KRW-BTC", "korean_name": "비트코인", "english_name": "Bitcoin" },
            { "market": "BTC-ETH", "korean_name": "이더리움", "english_name": "Ethereum" },
            { "market": "KRW-ETH", "korean_name": "이더리움", "english_name": "Ethereum" },
        ])))
        .mount(&server)
        .await;

    let provider = UpbitProvider::with_base_url(server.uri());
    let symbols = provider.list_symbols().await.unwrap();
    assert_eq!(symbols, vec!["KRW-BTC", "KRW-ETH"]);
}

#[tokio::test]
async fn candles_come_back_in_chronological_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/candles/days"))
        .and(query_param("market", "KRW-BTC"))
        .and(query_param("count", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candle_body("KRW-BTC", (0..5).rev())),
        )
        .mount(&server)
        .await;

    let provider = UpbitProvider::with_base_url(server.uri());
    let series = provider.fetch_daily_candles("KRW-BTC", 5).await.unwrap();

    assert_eq!(series.len(), 5);
    assert_eq!(series.closes(), vec![100.0, 101.0, 102.0, 103.0, 104.0]);
    assert_eq!(series.latest().volume, 1004.0);
    assert!(series.candles()[0].timestamp < series.candles()[4].timestamp);
}

#[tokio::test]
async fn long_lookbacks_page_backwards() {
    let server = MockServer::start().await;

    // first page: the newest 200 of 252 days
    Mock::given(method("GET"))
        .and(path("/v1/candles/days"))
        .and(query_param("market", "KRW-BTC"))
        .and(query_param("count", "200"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candle_body("KRW-BTC", (52..252).rev())),
        )
        .mount(&server)
        .await;

    // second page: the remaining 52 days before the cursor
    Mock::given(method("GET"))
        .and(path("/v1/candles/days"))
        .and(query_param("market", "KRW-BTC"))
        .and(query_param("count", "52"))
        .and(query_param("to", day_stamp(52)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candle_body("KRW-BTC", (0..52).rev())),
        )
        .mount(&server)
        .await;

    let provider = UpbitProvider::with_base_url(server.uri());
    let series = provider.fetch_daily_candles("KRW-BTC", 252).await.unwrap();

    assert_eq!(series.len(), 252);
    assert_eq!(series.candles()[0].close, 100.0);
    assert_eq!(series.latest().close, 100.0 + 251.0);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/candles/days"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let provider = UpbitProvider::with_base_url(server.uri());
    let error = provider
        .fetch_daily_candles("KRW-NOPE", 5)
        .await
        .unwrap_err();
    match error {
        FetchError::Status { status, .. } => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/candles/days"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/candles/days"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(candle_body("KRW-BTC", (0..5).rev())),
        )
        .mount(&server)
        .await;

    let provider = UpbitProvider::with_base_url(server.uri());
    let series = provider.fetch_daily_candles("KRW-BTC", 5).await.unwrap();
    assert_eq!(series.len(), 5);
}

#[tokio::test]
async fn an_empty_response_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/candles/days"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let provider = UpbitProvider::with_base_url(server.uri());
    let error = provider
        .fetch_daily_candles("KRW-NEW", 5)
        .await
        .unwrap_err();
    assert!(matches!(error, FetchError::Empty { .. }));
}
