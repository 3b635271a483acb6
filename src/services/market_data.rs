//! Market data provider interface and fetch errors.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::candle::{PriceSeries, SeriesError};

/// Data retrieval failed for a symbol.
///
/// Fetch failures are recorded and skipped by the scan; they never abort
/// it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {status} for {endpoint}")]
    Status { status: u16, endpoint: String },
    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid candle timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
    #[error("provider returned an invalid series for {symbol}: {source}")]
    InvalidSeries {
        symbol: String,
        #[source]
        source: SeriesError,
    },
    #[error("no candle data returned for {symbol}")]
    Empty { symbol: String },
    #[error("unknown symbol {symbol}")]
    UnknownSymbol { symbol: String },
}

impl FetchError {
    /// Transient faults worth retrying: transport errors, rate limiting,
    /// and server-side failures.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(_) => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Source of daily candles and of the tradable universe.
#[async_trait]
pub trait MarketDataProvider {
    /// Daily candles for `symbol`, chronologically ordered, at most
    /// `lookback_days` of them.
    async fn fetch_daily_candles(
        &self,
        symbol: &str,
        lookback_days: usize,
    ) -> Result<PriceSeries, FetchError>;

    /// Every symbol in the tradable universe, in the provider's
    /// enumeration order.
    async fn list_symbols(&self) -> Result<Vec<String>, FetchError>;
}

/// In-memory provider serving preloaded series; the test and demo stand-in
/// for a live data source.
#[derive(Debug, Default)]
pub struct StaticMarketData {
    series: BTreeMap<String, PriceSeries>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: impl Into<String>, series: PriceSeries) -> Self {
        self.series.insert(symbol.into(), series);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketData {
    async fn fetch_daily_candles(
        &self,
        symbol: &str,
        lookback_days: usize,
    ) -> Result<PriceSeries, FetchError> {
        let series = self
            .series
            .get(symbol)
            .ok_or_else(|| FetchError::UnknownSymbol {
                symbol: symbol.to_string(),
            })?;
        let candles = series.candles();
        let start = candles.len().saturating_sub(lookback_days);
        PriceSeries::new(candles[start..].to_vec()).map_err(|source| {
            FetchError::InvalidSeries {
                symbol: symbol.to_string(),
                source,
            }
        })
    }

    async fn list_symbols(&self) -> Result<Vec<String>, FetchError> {
        Ok(self.series.keys().cloned().collect())
    }
}
