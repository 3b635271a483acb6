//! Per-asset analysis outcomes and the ranked scan result set.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::indicators::IndicatorSet;
use crate::scoring::evaluator::CriteriaReport;
use crate::services::market_data::FetchError;

/// Direction of the short-vs-long mean volume comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    Up,
    Down,
}

/// Derived characteristics handed to commentary/report consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetCharacteristics {
    /// Sample standard deviation of daily returns, in percent.
    pub volatility_pct: f64,
    /// Whether the 7-day mean volume is strictly above the 30-day mean.
    pub volume_trend: VolumeTrend,
    /// Deviation of the latest close from the latest 200-day average, in
    /// percent.
    pub trend_strength_pct: f64,
    /// Signed change of the 7-day mean volume against the 30-day mean, in
    /// percent.
    pub volume_change_pct: f64,
}

/// Why an asset was screened out without a score.
///
/// These are data-quality outcomes, not faults: they are excluded from the
/// ranking and logged at debug level only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
    #[error("{days} days of history, {required} required")]
    InsufficientHistory { days: usize, required: usize },
    #[error("moving averages undefined at the latest day")]
    MissingIndicator,
    #[error("trailing low is not strictly positive")]
    NonPositiveLow,
    #[error("mean volume over the long window is zero")]
    ZeroVolume,
}

/// Everything the screen produced for one qualifying asset.
///
/// Built once per scan, never mutated afterwards, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub close: f64,
    pub volume: f64,
    /// Composite template score in `[0, 1]`.
    pub score: f64,
    pub criteria: CriteriaReport,
    pub characteristics: AssetCharacteristics,
    /// Full aligned averages, kept so charts can be redrawn downstream.
    pub indicators: IndicatorSet,
}

/// Terminal state of one asset's analysis.
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// Scored, characterized, and emitted into the ranking.
    Qualified(AnalysisResult),
    /// Screened out before scoring.
    Ineligible {
        symbol: String,
        reason: IneligibleReason,
    },
    /// The data provider failed for this symbol.
    FetchFailed { symbol: String, error: FetchError },
}

impl AnalysisOutcome {
    pub fn symbol(&self) -> &str {
        match self {
            AnalysisOutcome::Qualified(result) => &result.symbol,
            AnalysisOutcome::Ineligible { symbol, .. } => symbol,
            AnalysisOutcome::FetchFailed { symbol, .. } => symbol,
        }
    }
}

/// Ranked scan results plus bookkeeping over the whole universe.
#[derive(Debug, Serialize)]
pub struct ScanOutcome {
    /// Qualifying assets, descending by score; ties keep universe order.
    pub results: Vec<AnalysisResult>,
    pub universe_size: usize,
    pub fetch_failures: usize,
    pub ineligible: usize,
    pub elapsed: Duration,
}

impl ScanOutcome {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The `n` best-scoring assets (fewer when the outcome is smaller).
    pub fn top(&self, n: usize) -> &[AnalysisResult] {
        &self.results[..n.min(self.results.len())]
    }
}
