//! Unit tests for the commentary collaborators

use sepascan::analysis::opinion::{HeuristicOpinion, OpinionProvider, StaticOpinionTable};
use sepascan::models::analysis::{AssetCharacteristics, VolumeTrend};

fn characteristics(trend_strength_pct: f64, volume_trend: VolumeTrend) -> AssetCharacteristics {
    AssetCharacteristics {
        volatility_pct: 2.5,
        volume_trend,
        trend_strength_pct,
        volume_change_pct: 12.0,
    }
}

#[test]
fn heuristic_reflects_the_metrics() {
    let provider = HeuristicOpinion;
    let strong = provider.opinion("KRW-BTC", 0.95, &characteristics(8.0, VolumeTrend::Up));
    assert!(strong.contains("strong trend alignment"));
    assert!(strong.contains("above its long-term average"));
    assert!(strong.contains("picking up"));
    assert!(strong.contains("2.50%"));

    let weak = provider.opinion("KRW-XRP", 0.2, &characteristics(-3.0, VolumeTrend::Down));
    assert!(weak.contains("weak trend alignment"));
    assert!(weak.contains("below its long-term average"));
    assert!(weak.contains("fading"));
}

#[test]
fn static_table_falls_back_for_unknown_symbols() {
    let table = StaticOpinionTable::from_entries(
        [("KRW-BTC", "accumulate on pullbacks")],
        "further analysis required",
    );
    let characteristics = characteristics(1.0, VolumeTrend::Up);
    assert_eq!(
        table.opinion("KRW-BTC", 0.9, &characteristics),
        "accumulate on pullbacks"
    );
    assert_eq!(
        table.opinion("KRW-DOGE", 0.9, &characteristics),
        "further analysis required"
    );
}
