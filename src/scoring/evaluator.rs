//! Evaluates the trend-template criteria against computed indicators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::calculator::MIN_CANDLES;
use crate::models::candle::PriceSeries;
use crate::models::indicators::IndicatorSet;
use crate::scoring::criteria::Criterion;

/// Lookback to the 200-day-average reference row, in trading days.
pub const TREND_REFERENCE_DAYS: usize = 30;
/// Trailing window for the 52-week low, in trading days.
pub const YEAR_LOW_WINDOW: usize = 252;
/// Required margin of the close over the trailing low.
pub const YEAR_LOW_MARGIN: f64 = 0.30;

/// Contract violations in the evaluation call.
///
/// Callers reject ineligible assets before evaluating, so any of these
/// indicates a programming error. They propagate out of the scan rather
/// than being swallowed with the data-quality rejections.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoreError {
    #[error("evaluation requires {required} candles, got {actual}")]
    Precondition { required: usize, actual: usize },
    #[error("indicator series covers {indicators} days but the price series has {series}")]
    Misaligned { series: usize, indicators: usize },
    #[error("the {window}-day average is undefined at the latest day")]
    MissingIndicator { window: usize },
    #[error("trailing low {value} is not strictly positive")]
    NonPositiveLow { value: f64 },
}

/// One evaluated criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionCheck {
    pub criterion: Criterion,
    pub satisfied: bool,
    pub weight: f64,
}

/// All six checks plus the composite weighted score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaReport {
    checks: Vec<CriterionCheck>,
    score: f64,
}

impl CriteriaReport {
    fn new(checks: Vec<CriterionCheck>) -> Self {
        let score = checks
            .iter()
            .filter(|check| check.satisfied)
            .map(|check| check.weight)
            .sum();
        Self { checks, score }
    }

    /// Composite score: the sum of the weights of satisfied criteria,
    /// always in `[0, 1]`.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn checks(&self) -> &[CriterionCheck] {
        &self.checks
    }

    pub fn is_satisfied(&self, criterion: Criterion) -> bool {
        self.checks
            .iter()
            .any(|check| check.criterion == criterion && check.satisfied)
    }

    pub fn satisfied_count(&self) -> usize {
        self.checks.iter().filter(|check| check.satisfied).count()
    }
}

/// Scores a price series against the fixed trend template.
pub struct ScoreEvaluator;

impl ScoreEvaluator {
    /// Evaluate all criteria at the latest day.
    ///
    /// The caller guarantees at least [`MIN_CANDLES`] days of history, an
    /// indicator set aligned with the series, and a strictly positive
    /// `year_low` (the minimum low over the trailing
    /// [`YEAR_LOW_WINDOW`] days). If the 200-day average is undefined at
    /// the [`TREND_REFERENCE_DAYS`]-ago row, the trending-up criterion is
    /// false rather than an error.
    ///
    /// All comparisons are strict: equality never satisfies a criterion.
    pub fn evaluate(
        series: &PriceSeries,
        indicators: &IndicatorSet,
        year_low: f64,
    ) -> Result<CriteriaReport, ScoreError> {
        let len = series.len();
        if len < MIN_CANDLES {
            return Err(ScoreError::Precondition {
                required: MIN_CANDLES,
                actual: len,
            });
        }
        if indicators.len() != len {
            return Err(ScoreError::Misaligned {
                series: len,
                indicators: indicators.len(),
            });
        }
        if year_low <= 0.0 {
            return Err(ScoreError::NonPositiveLow { value: year_low });
        }

        let latest = indicators
            .latest()
            .ok_or(ScoreError::MissingIndicator { window: MIN_CANDLES })?;
        let close = series.latest().close;
        let ma200_reference = indicators.ma200.at(len - TREND_REFERENCE_DAYS);

        let checks = Criterion::ALL
            .iter()
            .map(|&criterion| {
                let satisfied = match criterion {
                    Criterion::CloseAboveMa200 => close > latest.ma200,
                    Criterion::Ma200TrendingUp => {
                        ma200_reference.is_some_and(|reference| latest.ma200 > reference)
                    }
                    Criterion::AboveYearLow => close / year_low - 1.0 > YEAR_LOW_MARGIN,
                    Criterion::Ma150AboveMa200 => latest.ma150 > latest.ma200,
                    Criterion::Ma50AboveLongTerm => {
                        latest.ma50 > latest.ma150 && latest.ma50 > latest.ma200
                    }
                    Criterion::CloseAboveMa5 => close > latest.ma5,
                };
                CriterionCheck {
                    criterion,
                    satisfied,
                    weight: criterion.weight(),
                }
            })
            .collect();

        Ok(CriteriaReport::new(checks))
    }
}
