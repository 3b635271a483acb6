//! Commentary collaborators consuming the computed characteristics.
//!
//! The engine produces numbers; turning them into human-readable text is
//! a pluggable concern. Symbol-specific copy belongs in a caller-supplied
//! table, never in the engine itself.

use std::collections::HashMap;

use crate::models::analysis::{AssetCharacteristics, VolumeTrend};

/// Strategy from computed metrics to commentary text.
pub trait OpinionProvider {
    fn opinion(&self, symbol: &str, score: f64, characteristics: &AssetCharacteristics) -> String;
}

/// Default commentary derived from the metrics alone.
#[derive(Debug, Default)]
pub struct HeuristicOpinion;

impl OpinionProvider for HeuristicOpinion {
    fn opinion(&self, _symbol: &str, score: f64, characteristics: &AssetCharacteristics) -> String {
        let stance = if score >= 0.8 {
            "strong trend alignment"
        } else if score >= 0.5 {
            "partial trend alignment"
        } else {
            "weak trend alignment"
        };
        let momentum = if characteristics.trend_strength_pct > 0.0 {
            "trading above its long-term average"
        } else {
            "trading below its long-term average"
        };
        let volume = match characteristics.volume_trend {
            VolumeTrend::Up => "volume picking up",
            VolumeTrend::Down => "volume fading",
        };
        format!(
            "{stance}; {momentum} with {volume} (daily volatility {:.2}%)",
            characteristics.volatility_pct
        )
    }
}

/// Caller-supplied per-symbol commentary with a fallback for everything
/// else.
#[derive(Debug)]
pub struct StaticOpinionTable {
    entries: HashMap<String, String>,
    fallback: String,
}

impl StaticOpinionTable {
    pub fn new(entries: HashMap<String, String>, fallback: impl Into<String>) -> Self {
        Self {
            entries,
            fallback: fallback.into(),
        }
    }

    pub fn from_entries<I, K, V>(entries: I, fallback: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            fallback,
        )
    }
}

impl OpinionProvider for StaticOpinionTable {
    fn opinion(&self, symbol: &str, _score: f64, _: &AssetCharacteristics) -> String {
        self.entries
            .get(symbol)
            .unwrap_or(&self.fallback)
            .clone()
    }
}
