//! Per-asset analysis pipeline: fetch, indicators, score, characteristics.

use std::sync::Arc;

use crate::analysis::characteristics;
use crate::indicators::calculator::IndicatorCalculator;
use crate::indicators::error::IndicatorError;
use crate::models::analysis::{AnalysisOutcome, AnalysisResult, IneligibleReason};
use crate::models::candle::PriceSeries;
use crate::scoring::evaluator::{ScoreError, ScoreEvaluator, YEAR_LOW_WINDOW};
use crate::services::market_data::MarketDataProvider;

/// Runs the full analysis for one asset.
///
/// Data-quality problems come back inside [`AnalysisOutcome`]; an `Err`
/// from here is an evaluation contract violation and aborts the scan.
pub struct AssetAnalyzer {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    lookback_days: usize,
}

impl AssetAnalyzer {
    pub fn new(provider: Arc<dyn MarketDataProvider + Send + Sync>, lookback_days: usize) -> Self {
        Self {
            provider,
            lookback_days,
        }
    }

    /// Fetch the symbol's history and analyze it.
    pub async fn analyze(&self, symbol: &str) -> Result<AnalysisOutcome, ScoreError> {
        let series = match self
            .provider
            .fetch_daily_candles(symbol, self.lookback_days)
            .await
        {
            Ok(series) => series,
            Err(error) => {
                return Ok(AnalysisOutcome::FetchFailed {
                    symbol: symbol.to_string(),
                    error,
                })
            }
        };
        Self::analyze_series(symbol, &series)
    }

    /// The pure part of the pipeline, separated from the fetch so it can
    /// be exercised on synthetic series.
    pub fn analyze_series(
        symbol: &str,
        series: &PriceSeries,
    ) -> Result<AnalysisOutcome, ScoreError> {
        let ineligible = |reason| {
            Ok(AnalysisOutcome::Ineligible {
                symbol: symbol.to_string(),
                reason,
            })
        };

        let indicators = match IndicatorCalculator::compute(series) {
            Ok(indicators) => indicators,
            Err(IndicatorError::InsufficientData { actual, required }) => {
                return ineligible(IneligibleReason::InsufficientHistory {
                    days: actual,
                    required,
                })
            }
        };

        let Some(latest) = indicators.latest() else {
            return ineligible(IneligibleReason::MissingIndicator);
        };

        let year_low = series.tail_min_low(YEAR_LOW_WINDOW);
        if year_low <= 0.0 {
            return ineligible(IneligibleReason::NonPositiveLow);
        }

        let criteria = ScoreEvaluator::evaluate(series, &indicators, year_low)?;

        let Some(characteristics) = characteristics::compute(series, latest.ma200) else {
            return ineligible(IneligibleReason::ZeroVolume);
        };

        let latest_candle = series.latest();
        Ok(AnalysisOutcome::Qualified(AnalysisResult {
            symbol: symbol.to_string(),
            close: latest_candle.close,
            volume: latest_candle.volume,
            score: criteria.score(),
            criteria,
            characteristics,
            indicators,
        }))
    }
}
