//! Builders for raw hourly snapshots.

use cxscan::domain::{HourlySnapshot, RawMarketRecord};

pub const LEAGUE: &str = "Standard";

/// Record for `a|b` where one `a` traded for between `min` and `max` `b`.
pub fn market(id: &str, min: f64, max: f64) -> RawMarketRecord {
    let (a, b) = id.split_once('|').expect("pair id");
    RawMarketRecord::new(LEAGUE, id)
        .with_lowest((a, 1.0), (b, max))
        .with_highest((a, 1.0), (b, min))
}

/// Record whose spread is `spread` around a price of 0.25.
pub fn spread_market(id: &str, spread: f64) -> RawMarketRecord {
    market(id, 0.25, 0.25 * (1.0 + spread))
}

pub fn snapshot(markets: Vec<RawMarketRecord>) -> HourlySnapshot {
    HourlySnapshot::new(markets)
}

/// A small chaos-based hour:
///
/// - `divine|chaos` 240-260, 10000 chaos and 40 divine traded
/// - `alch|chaos` 0.30-0.33, 500 chaos
/// - `fusing|chaos` 0.50-0.505, 200 chaos
/// - `alch|fusing` 0.70-0.72, 50 chaos
///
/// followed by one skipped record per skip reason.
pub fn sample_hour() -> HourlySnapshot {
    snapshot(vec![
        market("divine|chaos", 240.0, 260.0)
            .with_volume("chaos", 10_000.0)
            .with_volume("divine", 40.0),
        market("alch|chaos", 0.30, 0.33).with_volume("chaos", 500.0),
        market("fusing|chaos", 0.50, 0.505).with_volume("chaos", 200.0),
        market("alch|fusing", 0.70, 0.72).with_volume("chaos", 50.0),
        RawMarketRecord {
            league: "Hardcore".to_string(),
            ..market("jewel|chaos", 0.1, 0.2)
        },
        RawMarketRecord::new(LEAGUE, "jewel")
            .with_lowest(("jewel", 1.0), ("chaos", 0.2))
            .with_highest(("jewel", 1.0), ("chaos", 0.1)),
        RawMarketRecord::new(LEAGUE, "vaal|chaos"),
        market("chrome|chaos", 0.0, 0.1),
    ])
}

/// Hour in which `alch|chaos` has the given spread while `divine|chaos`
/// and `fusing|chaos` stay put.
pub fn trend_hour(alch_spread: f64) -> HourlySnapshot {
    snapshot(vec![
        market("divine|chaos", 240.0, 260.0)
            .with_volume("chaos", 10_000.0)
            .with_volume("divine", 40.0),
        spread_market("alch|chaos", alch_spread).with_volume("chaos", 500.0),
        spread_market("fusing|chaos", 0.01).with_volume("chaos", 200.0),
    ])
}
