//! Derived moving-average series aligned with a price series.

use serde::{Deserialize, Serialize};

/// Moving-average windows the trend template is built on, in trading days.
pub const MA_WINDOWS: [usize; 4] = [5, 50, 150, 200];

/// One rolling average, aligned 1:1 with the source series.
///
/// The first `window - 1` entries are `None`: the average is undefined
/// there, not zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaSeries {
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

impl MaSeries {
    pub fn new(window: usize, values: Vec<Option<f64>>) -> Self {
        Self { window, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at the given day, if defined.
    pub fn at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Value at the most recent day, if defined.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }
}

/// Latest value of every template average, extracted once all are defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatestAverages {
    pub ma5: f64,
    pub ma50: f64,
    pub ma150: f64,
    pub ma200: f64,
}

/// The full set of rolling averages derived from one price series.
///
/// Carries the whole aligned series (not just the latest values) so chart
/// consumers can redraw price plus overlays without recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub ma5: MaSeries,
    pub ma50: MaSeries,
    pub ma150: MaSeries,
    pub ma200: MaSeries,
}

impl IndicatorSet {
    /// Number of days covered; all member series share it.
    pub fn len(&self) -> usize {
        self.ma200.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ma200.is_empty()
    }

    pub fn by_window(&self, window: usize) -> Option<&MaSeries> {
        match window {
            5 => Some(&self.ma5),
            50 => Some(&self.ma50),
            150 => Some(&self.ma150),
            200 => Some(&self.ma200),
            _ => None,
        }
    }

    /// Latest value of every average, or `None` if any is still undefined.
    pub fn latest(&self) -> Option<LatestAverages> {
        Some(LatestAverages {
            ma5: self.ma5.latest()?,
            ma50: self.ma50.latest()?,
            ma150: self.ma150.latest()?,
            ma200: self.ma200.latest()?,
        })
    }
}
