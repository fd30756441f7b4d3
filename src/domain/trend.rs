//! Per-pair time series and the multi-hour records derived from them.

use std::sync::Arc;

use serde::Serialize;

use super::pair::PairId;
use super::snapshot::VolumeMap;

/// One hour's observation of a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadPoint {
    /// Position of the hour in the analysed window, oldest first.
    pub hour_index: usize,
    pub spread: f64,
    pub min_price: f64,
    pub max_price: f64,
    #[serde(skip)]
    pub volume: Arc<VolumeMap>,
}

/// Append-only spread and volume history of one pair.
///
/// Grows by exactly one entry per hour in which the pair had a valid edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketHistory {
    points: Vec<SpreadPoint>,
    base_volumes: Vec<f64>,
    divine_volumes: Vec<f64>,
}

impl MarketHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, point: SpreadPoint, base_volume: f64, divine_volume: f64) {
        self.points.push(point);
        self.base_volumes.push(base_volume);
        self.divine_volumes.push(divine_volume);
    }

    #[must_use]
    pub fn points(&self) -> &[SpreadPoint] {
        &self.points
    }

    #[must_use]
    pub fn spreads(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.spread).collect()
    }

    #[must_use]
    pub fn base_volumes(&self) -> &[f64] {
        &self.base_volumes
    }

    #[must_use]
    pub fn divine_volumes(&self) -> &[f64] {
        &self.divine_volumes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&SpreadPoint> {
        self.points.last()
    }
}

/// A pair whose spread stayed wide across many hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistentMarket {
    pub pair: PairId,
    /// Fraction of recorded hours with `spread >= min_spread`, in `[0, 1]`.
    pub persistence_ratio: f64,
    pub hours_with_spread: usize,
    pub total_hours: usize,
    pub avg_spread: f64,
    pub median_spread: f64,
    pub max_spread: f64,
    pub min_spread: f64,
    pub std_dev: f64,
    pub avg_base_volume: f64,
    pub avg_divine_volume: f64,
    pub total_base_volume: f64,
    pub total_divine_volume: f64,
    pub hours_with_volume: usize,
    pub volume_consistency: f64,
    pub latest_spread: f64,
    pub latest_min_price: f64,
    pub latest_max_price: f64,
    pub latest_base_volume: f64,
    pub latest_divine_volume: f64,
    /// `persistence_ratio * avg_spread * (1 + volume_consistency)`.
    pub score: f64,
}

/// A pair whose spread has been widening over the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingMarket {
    pub pair: PairId,
    pub trend_slope: f64,
    pub latest_spread: f64,
    pub avg_recent_spread: f64,
    /// Last minus first spread of the window.
    pub spread_change: f64,
    pub hours_analyzed: usize,
    pub avg_base_volume: f64,
    pub avg_divine_volume: f64,
    pub latest_base_volume: f64,
    pub latest_divine_volume: f64,
}

/// The latest hour's spread against the pair's own history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalComparison {
    pub pair: PairId,
    pub current_spread: f64,
    pub historical_avg: f64,
    pub historical_median: f64,
    pub historical_max: f64,
    pub hours_tracked: usize,
    /// `current_spread - historical_avg`.
    pub vs_avg: f64,
    /// Share of historical spreads strictly below the current one (0-100).
    pub percentile: f64,
}

impl HistoricalComparison {
    #[must_use]
    pub fn is_above_average(&self) -> bool {
        self.vs_avg > 0.0
    }
}

/// Full-window statistics for one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub pair: PairId,
    pub hours_tracked: usize,
    pub avg_spread: f64,
    pub median_spread: f64,
    pub max_spread: f64,
    pub min_spread: f64,
    pub std_dev: f64,
    pub avg_base_volume: f64,
    pub avg_divine_volume: f64,
    pub points: Vec<SpreadPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(hour_index: usize, spread: f64) -> SpreadPoint {
        SpreadPoint {
            hour_index,
            spread,
            min_price: 1.0,
            max_price: 1.0 + spread,
            volume: Arc::new(VolumeMap::new()),
        }
    }

    #[test]
    fn history_appends_in_parallel() {
        let mut history = MarketHistory::new();
        assert!(history.is_empty());

        history.record(point(0, 0.03), 100.0, 0.0);
        history.record(point(1, 0.05), 0.0, 2.0);

        assert_eq!(history.len(), 2);
        assert_eq!(history.spreads(), vec![0.03, 0.05]);
        assert_eq!(history.base_volumes(), &[100.0, 0.0]);
        assert_eq!(history.divine_volumes(), &[0.0, 2.0]);
        assert_eq!(history.latest().map(|p| p.hour_index), Some(1));
    }
}
