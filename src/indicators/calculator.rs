//! Derives the trend-template moving averages from a price series.

use crate::indicators::error::IndicatorError;
use crate::indicators::sma::rolling_sma;
use crate::models::candle::PriceSeries;
use crate::models::indicators::{IndicatorSet, MaSeries};

/// Minimum history for the template: the largest moving-average window.
pub const MIN_CANDLES: usize = 200;

/// Pure transform from a price series to its moving-average set.
pub struct IndicatorCalculator;

impl IndicatorCalculator {
    /// Compute all template averages over the close prices.
    ///
    /// Errors with [`IndicatorError::InsufficientData`] below
    /// [`MIN_CANDLES`] days; no average would be defined at the latest day
    /// and the asset cannot be evaluated.
    pub fn compute(series: &PriceSeries) -> Result<IndicatorSet, IndicatorError> {
        if series.len() < MIN_CANDLES {
            return Err(IndicatorError::InsufficientData {
                required: MIN_CANDLES,
                actual: series.len(),
            });
        }

        let closes = series.closes();
        let ma = |window: usize| MaSeries::new(window, rolling_sma(&closes, window));

        Ok(IndicatorSet {
            ma5: ma(5),
            ma50: ma(50),
            ma150: ma(150),
            ma200: ma(200),
        })
    }
}
