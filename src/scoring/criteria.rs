//! The fixed trend-template criteria and their weights.

use serde::{Deserialize, Serialize};

/// One boolean criterion of the trend template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Latest close strictly above the 200-day average.
    CloseAboveMa200,
    /// 200-day average strictly above its value 30 trading days ago.
    Ma200TrendingUp,
    /// Close more than 30% above the trailing 252-day low.
    AboveYearLow,
    /// 150-day average strictly above the 200-day average.
    Ma150AboveMa200,
    /// 50-day average strictly above both the 150- and 200-day averages.
    Ma50AboveLongTerm,
    /// Latest close strictly above the 5-day average.
    CloseAboveMa5,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Criterion::CloseAboveMa200,
        Criterion::Ma200TrendingUp,
        Criterion::AboveYearLow,
        Criterion::Ma150AboveMa200,
        Criterion::Ma50AboveLongTerm,
        Criterion::CloseAboveMa5,
    ];

    /// Weight this criterion contributes when satisfied. The six weights
    /// total 1.0, so a full pass scores exactly 1.0.
    pub fn weight(self) -> f64 {
        match self {
            Criterion::CloseAboveMa200 => 0.20,
            Criterion::Ma200TrendingUp => 0.20,
            Criterion::AboveYearLow => 0.20,
            Criterion::Ma150AboveMa200 => 0.15,
            Criterion::Ma50AboveLongTerm => 0.15,
            Criterion::CloseAboveMa5 => 0.10,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Criterion::CloseAboveMa200 => "price above the 200-day average",
            Criterion::Ma200TrendingUp => "200-day average trending up",
            Criterion::AboveYearLow => "price 30% above the 52-week low",
            Criterion::Ma150AboveMa200 => "150-day average above the 200-day average",
            Criterion::Ma50AboveLongTerm => "50-day average above the 150- and 200-day averages",
            Criterion::CloseAboveMa5 => "price above the 5-day average",
        }
    }

    /// Sum of all weights; must be 1.0.
    pub fn total_weight() -> f64 {
        Self::ALL.iter().map(|c| c.weight()).sum()
    }

    /// Verify the weight table sums to 1.0.
    pub fn verify_weights() -> bool {
        (Self::total_weight() - 1.0).abs() < 1e-9
    }
}
