//! Derived per-asset characteristics for commentary and reporting.

use crate::models::analysis::{AssetCharacteristics, VolumeTrend};
use crate::models::candle::PriceSeries;

/// Short window for the volume-trend comparison, in trading days.
pub const SHORT_VOLUME_WINDOW: usize = 7;
/// Long window for the volume-trend comparison, in trading days.
pub const LONG_VOLUME_WINDOW: usize = 30;

/// Compute the characteristics block from the raw series and the latest
/// 200-day average.
///
/// Returns `None` when the long-window mean volume is zero; the
/// volume-change ratio is undefined there and the asset is screened out
/// upstream.
pub fn compute(series: &PriceSeries, ma200_latest: f64) -> Option<AssetCharacteristics> {
    let short_mean = series.tail_mean_volume(SHORT_VOLUME_WINDOW);
    let long_mean = series.tail_mean_volume(LONG_VOLUME_WINDOW);
    if long_mean <= 0.0 {
        return None;
    }

    let close = series.latest().close;
    let volume_trend = if short_mean > long_mean {
        VolumeTrend::Up
    } else {
        VolumeTrend::Down
    };

    Some(AssetCharacteristics {
        volatility_pct: daily_return_stddev(series) * 100.0,
        volume_trend,
        trend_strength_pct: (close - ma200_latest) / ma200_latest * 100.0,
        volume_change_pct: (short_mean / long_mean - 1.0) * 100.0,
    })
}

/// Sample standard deviation of day-over-day returns.
fn daily_return_stddev(series: &PriceSeries) -> f64 {
    let closes = series.closes();
    let returns: Vec<f64> = closes
        .windows(2)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .collect();
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns
        .iter()
        .map(|r| (r - mean).powi(2))
        .sum::<f64>()
        / (returns.len() - 1) as f64;
    variance.sqrt()
}
