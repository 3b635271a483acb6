//! Upbit public REST market data provider.
//!
//! Uses the two unauthenticated endpoints the screen needs: `GET
//! /v1/market/all` for the tradable universe and `GET /v1/candles/days`
//! for daily candles. The candle endpoint returns at most 200 rows per
//! request, newest first, so longer lookbacks page backwards with the
//! `to` cursor before the series is reversed into chronological order.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::candle::{Candle, PriceSeries};
use crate::services::market_data::{FetchError, MarketDataProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.upbit.com";

/// Quote-currency prefix of the markets the screen trades.
pub const KRW_MARKET_PREFIX: &str = "KRW-";

/// Upbit caps the candle endpoint at 200 rows per request.
const MAX_CANDLES_PER_REQUEST: usize = 200;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Deserialize)]
struct MarketEntry {
    market: String,
}

#[derive(Debug, Deserialize)]
struct DayCandle {
    candle_date_time_utc: String,
    opening_price: f64,
    high_price: f64,
    low_price: f64,
    trade_price: f64,
    candle_acc_trade_volume: f64,
}

impl DayCandle {
    fn into_candle(self) -> Result<Candle, FetchError> {
        let timestamp =
            NaiveDateTime::parse_from_str(&self.candle_date_time_utc, TIMESTAMP_FORMAT)?.and_utc();
        Ok(Candle::new(
            self.opening_price,
            self.high_price,
            self.low_price,
            self.trade_price,
            self.candle_acc_trade_volume,
            timestamp,
        ))
    }
}

pub struct UpbitProvider {
    client: reqwest::Client,
    base_url: String,
}

impl UpbitProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at a different host, e.g. a mock server in
    /// tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        (|| self.request_once(path))
            .retry(ExponentialBuilder::default())
            .when(|error: &FetchError| error.is_retryable())
            .notify(|error: &FetchError, delay| {
                warn!(%error, ?delay, "retrying Upbit request");
            })
            .await
    }

    async fn request_once<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for UpbitProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for UpbitProvider {
    async fn fetch_daily_candles(
        &self,
        symbol: &str,
        lookback_days: usize,
    ) -> Result<PriceSeries, FetchError> {
        let mut collected: Vec<DayCandle> = Vec::with_capacity(lookback_days);
        // Oldest row already fetched; Upbit returns candles strictly
        // before it.
        let mut cursor: Option<String> = None;

        while collected.len() < lookback_days {
            let count = (lookback_days - collected.len()).min(MAX_CANDLES_PER_REQUEST);
            let mut path = format!("/v1/candles/days?market={}&count={}", symbol, count);
            if let Some(to) = &cursor {
                path.push_str("&to=");
                path.push_str(to);
            }

            let batch: Vec<DayCandle> = self.get_json(&path).await?;
            if batch.is_empty() {
                break;
            }
            let fetched = batch.len();
            cursor = batch.last().map(|c| c.candle_date_time_utc.clone());
            collected.extend(batch);
            if fetched < count {
                // The provider ran out of history for this market.
                break;
            }
        }

        if collected.is_empty() {
            return Err(FetchError::Empty {
                symbol: symbol.to_string(),
            });
        }

        debug!(symbol, candles = collected.len(), "fetched daily candles");

        let candles = collected
            .into_iter()
            .rev()
            .map(DayCandle::into_candle)
            .collect::<Result<Vec<_>, _>>()?;
        PriceSeries::new(candles).map_err(|source| FetchError::InvalidSeries {
            symbol: symbol.to_string(),
            source,
        })
    }

    async fn list_symbols(&self) -> Result<Vec<String>, FetchError> {
        let markets: Vec<MarketEntry> = self.get_json("/v1/market/all").await?;
        Ok(markets
            .into_iter()
            .map(|entry| entry.market)
            .filter(|market| market.starts_with(KRW_MARKET_PREFIX))
            .collect())
    }
}
