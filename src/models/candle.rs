//! Daily OHLCV candles and the validated price series they form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily candle: open/high/low/close prices plus traded volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    /// Trading day this candle covers.
    pub fn trading_day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Violations of the price-series ordering invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("price series cannot be empty")]
    Empty,
    #[error("candle at index {index} is out of chronological order")]
    OutOfOrder { index: usize },
    #[error("duplicate trading day {day} at index {index}")]
    DuplicateDay { day: NaiveDate, index: usize },
}

/// Chronologically ordered daily candles with no duplicate trading days.
///
/// The invariant is enforced at construction, so downstream code can index
/// freely: a `PriceSeries` is never empty and day *i+1* is always strictly
/// after day *i*.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, SeriesError> {
        if candles.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (index, pair) in candles.windows(2).enumerate() {
            let prev = pair[0].trading_day();
            let next = pair[1].trading_day();
            if next == prev {
                return Err(SeriesError::DuplicateDay {
                    day: next,
                    index: index + 1,
                });
            }
            if next < prev {
                return Err(SeriesError::OutOfOrder { index: index + 1 });
            }
        }
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Always false: the empty series is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Most recent candle.
    pub fn latest(&self) -> &Candle {
        self.candles.last().expect("series is non-empty by construction")
    }

    /// Close prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Minimum low over the trailing `window` candles (whole series when
    /// shorter).
    pub fn tail_min_low(&self, window: usize) -> f64 {
        let start = self.candles.len().saturating_sub(window);
        self.candles[start..]
            .iter()
            .map(|c| c.low)
            .fold(f64::INFINITY, f64::min)
    }

    /// Mean volume over the trailing `window` candles (whole series when
    /// shorter).
    pub fn tail_mean_volume(&self, window: usize) -> f64 {
        let start = self.candles.len().saturating_sub(window);
        let tail = &self.candles[start..];
        tail.iter().map(|c| c.volume).sum::<f64>() / tail.len() as f64
    }
}
