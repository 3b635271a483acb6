//! End-to-end scan against a mock Upbit server

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use sepascan::config::ScanConfig;
use sepascan::scanner::universe::UniverseScanner;
use sepascan::services::upbit::UpbitProvider;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOOKBACK: usize = 200;

fn day_stamp(i: usize) -> String {
    let day = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap() + Duration::days(i as i64);
    day.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Newest-first candle page where the close follows `close_at(day)`.
fn candle_page(symbol: &str, len: usize, close_at: impl Fn(usize) -> f64) -> Value {
    let rows: Vec<Value> = (0..len)
        .rev()
        .map(|i| {
            let close = close_at(i);
            json!({
                "market": symbol,
                "candle_date_time_utc": day_stamp(i),
                "opening_price": close,
                "high_price": close,
                "low_price": close,
                "trade_price": close,
                "candle_acc_trade_volume": 5000.0,
            })
        })
        .collect();
    Value::Array(rows)
}

async fn mount_candles(server: &MockServer, symbol: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/candles/days"))
        .and(query_param("market", symbol))
        .and(query_param("count", LOOKBACK.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn scans_the_listed_universe_and_ranks_it() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/market/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "market": "KRW-RISE" },
            { "market": "BTC-SKIP" },
            { "market": "KRW-FLAT" },
        ])))
        .mount(&server)
        .await;

    mount_candles(
        &server,
        "KRW-RISE",
        candle_page("KRW-RISE", LOOKBACK, |i| 100.0 + i as f64),
    )
    .await;
    mount_candles(
        &server,
        "KRW-FLAT",
        candle_page("KRW-FLAT", LOOKBACK, |_| 100.0),
    )
    .await;

    let provider = Arc::new(UpbitProvider::with_base_url(server.uri()));
    let scanner = UniverseScanner::new(
        provider,
        ScanConfig {
            workers: 2,
            lookback_days: LOOKBACK,
        },
    );

    let outcome = scanner.scan_universe().await.unwrap();

    // the BTC-quoted market is not part of the universe
    assert_eq!(outcome.universe_size, 2);
    assert_eq!(outcome.len(), 2);
    assert_eq!(outcome.fetch_failures, 0);
    assert_eq!(outcome.ineligible, 0);

    assert_eq!(outcome.results[0].symbol, "KRW-RISE");
    assert_eq!(outcome.results[1].symbol, "KRW-FLAT");
    assert!(outcome.results[0].score > outcome.results[1].score);
    assert_eq!(outcome.results[1].score, 0.0);

    // chart data survives the pipeline
    assert_eq!(outcome.results[0].indicators.len(), LOOKBACK);
    assert!(outcome.results[0].indicators.ma200.latest().is_some());
}

#[tokio::test]
async fn a_symbol_without_data_does_not_abort_the_scan() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/market/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "market": "KRW-RISE" },
            { "market": "KRW-EMPTY" },
        ])))
        .mount(&server)
        .await;

    mount_candles(
        &server,
        "KRW-RISE",
        candle_page("KRW-RISE", LOOKBACK, |i| 100.0 + i as f64),
    )
    .await;
    mount_candles(&server, "KRW-EMPTY", json!([])).await;

    let provider = Arc::new(UpbitProvider::with_base_url(server.uri()));
    let scanner = UniverseScanner::new(
        provider,
        ScanConfig {
            workers: 2,
            lookback_days: LOOKBACK,
        },
    );

    let outcome = scanner.scan_universe().await.unwrap();
    assert_eq!(outcome.universe_size, 2);
    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.fetch_failures, 1);
    assert_eq!(outcome.results[0].symbol, "KRW-RISE");
}
