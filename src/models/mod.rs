//! Shared data models spanning the engine layers.

pub mod analysis;
pub mod candle;
pub mod indicators;

pub use analysis::{
    AnalysisOutcome, AnalysisResult, AssetCharacteristics, IneligibleReason, ScanOutcome,
    VolumeTrend,
};
pub use candle::{Candle, PriceSeries, SeriesError};
pub use indicators::{IndicatorSet, LatestAverages, MaSeries, MA_WINDOWS};
