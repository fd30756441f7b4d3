//! Multi-hour aggregation over a window of hourly analyzers.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::config::{ComparisonConfig, MarketConfig, PersistenceConfig, TrendingConfig};
use super::hour::HourAnalyzer;
use crate::domain::stats;
use crate::domain::{
    BaseCurrency, GraphBuilder, HistoricalComparison, HourlySnapshot, MarketHistory,
    MarketSummary, PairId, PersistentMarket, SpreadPoint, TrendingMarket, DIVINE,
};

/// Folds a window of hours, oldest first, into per-pair histories.
///
/// Histories are complete once the aggregator is constructed; every trend
/// query reads them without further mutation.
#[derive(Debug, Clone)]
pub struct TrendAggregator {
    analyzers: Vec<HourAnalyzer>,
    history: BTreeMap<PairId, MarketHistory>,
    base: BaseCurrency,
    divine_to_base_ratio: f64,
}

impl TrendAggregator {
    /// Fewest analysed hours any trend query will run on.
    pub const MIN_HOURS: usize = 2;

    #[must_use]
    pub fn new(analyzers: Vec<HourAnalyzer>, base: BaseCurrency, market: &MarketConfig) -> Self {
        let history = fold_history(&analyzers, base);

        let direct: Vec<f64> = analyzers
            .iter()
            .filter_map(HourAnalyzer::direct_divine_ratio)
            .collect();
        let divine_to_base_ratio = if direct.is_empty() {
            market.fallback_divine_ratio(base)
        } else {
            stats::median(&direct)
        };

        info!(
            hours = analyzers.len(),
            pairs = history.len(),
            base = %base,
            divine_to_base_ratio,
            "Trend history built"
        );

        Self {
            analyzers,
            history,
            base,
            divine_to_base_ratio,
        }
    }

    /// Analyze each snapshot, oldest first, and fold the results.
    #[must_use]
    pub fn from_snapshots(
        snapshots: &[HourlySnapshot],
        builder: &GraphBuilder,
        base: BaseCurrency,
        market: &MarketConfig,
    ) -> Self {
        let analyzers = snapshots
            .iter()
            .map(|snapshot| HourAnalyzer::from_snapshot(snapshot, builder, base, market))
            .collect();
        Self::new(analyzers, base, market)
    }

    #[must_use]
    pub fn hours_analyzed(&self) -> usize {
        self.analyzers.len()
    }

    #[must_use]
    pub fn has_enough_history(&self) -> bool {
        self.hours_analyzed() >= Self::MIN_HOURS
    }

    #[must_use]
    pub const fn base_currency(&self) -> BaseCurrency {
        self.base
    }

    /// Median of the hourly direct divine/base ratios, or the configured
    /// fallback when no hour had a direct market.
    #[must_use]
    pub const fn divine_to_base_ratio(&self) -> f64 {
        self.divine_to_base_ratio
    }

    #[must_use]
    pub fn analyzers(&self) -> &[HourAnalyzer] {
        &self.analyzers
    }

    /// The newest hour in the window.
    #[must_use]
    pub fn latest(&self) -> Option<&HourAnalyzer> {
        self.analyzers.last()
    }

    #[must_use]
    pub fn history(&self, pair: &PairId) -> Option<&MarketHistory> {
        self.history.get(pair)
    }

    /// Tracked pairs in id order.
    pub fn pairs(&self) -> impl Iterator<Item = &PairId> {
        self.history.keys()
    }

    /// Pairs whose spread met `min_spread` in enough of the recorded hours,
    /// best score first.
    #[must_use]
    pub fn persistent_markets(&self, config: &PersistenceConfig) -> Vec<PersistentMarket> {
        if !self.has_enough_history() {
            return Vec::new();
        }

        let mut markets = Vec::new();

        for (pair, history) in &self.history {
            let total_hours = history.len();
            if total_hours < 2 {
                continue;
            }
            let Some(latest) = history.latest() else {
                continue;
            };

            let spreads = history.spreads();
            let hours_with_spread = spreads.iter().filter(|s| **s >= config.min_spread).count();
            let persistence_ratio = hours_with_spread as f64 / total_hours as f64;
            if persistence_ratio < config.threshold {
                continue;
            }

            let base_volumes = history.base_volumes();
            let divine_volumes = history.divine_volumes();
            let volume = self.volume_profile(base_volumes, divine_volumes);
            if volume.base_equivalent() < config.min_avg_volume {
                continue;
            }

            let hours_with_volume = base_volumes
                .iter()
                .zip(divine_volumes)
                .filter(|(base, divine)| **base > 0.0 || **divine > 0.0)
                .count();
            let volume_consistency = hours_with_volume as f64 / total_hours as f64;
            let avg_spread = stats::mean(&spreads);

            markets.push(PersistentMarket {
                pair: pair.clone(),
                persistence_ratio,
                hours_with_spread,
                total_hours,
                avg_spread,
                median_spread: stats::median(&spreads),
                max_spread: stats::max(&spreads),
                min_spread: stats::min(&spreads),
                std_dev: stats::sample_std_dev(&spreads),
                avg_base_volume: volume.avg_base,
                avg_divine_volume: volume.avg_divine,
                total_base_volume: base_volumes.iter().sum(),
                total_divine_volume: divine_volumes.iter().sum(),
                hours_with_volume,
                volume_consistency,
                latest_spread: latest.spread,
                latest_min_price: latest.min_price,
                latest_max_price: latest.max_price,
                latest_base_volume: base_volumes.last().copied().unwrap_or(0.0),
                latest_divine_volume: divine_volumes.last().copied().unwrap_or(0.0),
                score: persistence_ratio * avg_spread * (1.0 + volume_consistency),
            });
        }

        markets.sort_by(|a, b| b.score.total_cmp(&a.score));
        markets.truncate(config.top_n);
        debug!(count = markets.len(), "Persistent markets ranked");
        markets
    }

    /// Pairs whose spread widened over the last `lookback_hours` points,
    /// steepest first.
    #[must_use]
    pub fn trending_markets(&self, config: &TrendingConfig) -> Vec<TrendingMarket> {
        if !self.has_enough_history() {
            return Vec::new();
        }

        let lookback = config.lookback_hours;
        let mut markets = Vec::new();

        for (pair, history) in &self.history {
            if history.len() < lookback {
                continue;
            }
            let start = history.len() - lookback;
            let spreads = history.spreads();
            let recent = &spreads[start..];
            let base_volumes = &history.base_volumes()[start..];
            let divine_volumes = &history.divine_volumes()[start..];

            let volume = self.volume_profile(base_volumes, divine_volumes);
            if volume.base_equivalent() < config.min_avg_volume {
                continue;
            }

            let Some(slope) = stats::ols_slope(recent) else {
                continue;
            };
            if !slope.is_finite() {
                warn!(pair = %pair, "Non-finite trend slope, skipping pair");
                continue;
            }
            if slope <= 0.0 {
                continue;
            }

            let first = recent.first().copied().unwrap_or(0.0);
            let last = recent.last().copied().unwrap_or(0.0);

            markets.push(TrendingMarket {
                pair: pair.clone(),
                trend_slope: slope,
                latest_spread: last,
                avg_recent_spread: stats::mean(recent),
                spread_change: last - first,
                hours_analyzed: recent.len(),
                avg_base_volume: volume.avg_base,
                avg_divine_volume: volume.avg_divine,
                latest_base_volume: base_volumes.last().copied().unwrap_or(0.0),
                latest_divine_volume: divine_volumes.last().copied().unwrap_or(0.0),
            });
        }

        markets.sort_by(|a, b| b.trend_slope.total_cmp(&a.trend_slope));
        markets.truncate(config.top_n);
        debug!(count = markets.len(), lookback, "Trending markets ranked");
        markets
    }

    /// Full-window statistics for one pair, `None` if it was never recorded.
    #[must_use]
    pub fn market_summary(&self, pair: &PairId) -> Option<MarketSummary> {
        let history = self.history.get(pair)?;
        if history.is_empty() {
            return None;
        }
        let spreads = history.spreads();

        Some(MarketSummary {
            pair: pair.clone(),
            hours_tracked: history.len(),
            avg_spread: stats::mean(&spreads),
            median_spread: stats::median(&spreads),
            max_spread: stats::max(&spreads),
            min_spread: stats::min(&spreads),
            std_dev: stats::sample_std_dev(&spreads),
            avg_base_volume: stats::nonzero_mean(history.base_volumes()),
            avg_divine_volume: stats::nonzero_mean(history.divine_volumes()),
            points: history.points().to_vec(),
        })
    }

    /// Compare each pair of `current` against its recorded history, furthest
    /// above average first.
    #[must_use]
    pub fn compare_with(
        &self,
        current: &HourAnalyzer,
        config: &ComparisonConfig,
    ) -> Vec<HistoricalComparison> {
        if !self.has_enough_history() {
            return Vec::new();
        }

        let mut comparisons = Vec::new();

        for (pair, edge) in current.canonical_edges() {
            let Some(current_spread) = edge.spread() else {
                continue;
            };
            if !current_spread.is_finite() || current_spread <= config.min_current_spread {
                continue;
            }
            let Some(history) = self.history.get(&pair) else {
                continue;
            };
            let spreads = history.spreads();
            if spreads.is_empty() {
                continue;
            }

            let historical_avg = stats::mean(&spreads);
            comparisons.push(HistoricalComparison {
                current_spread,
                historical_avg,
                historical_median: stats::median(&spreads),
                historical_max: stats::max(&spreads),
                hours_tracked: spreads.len(),
                vs_avg: current_spread - historical_avg,
                percentile: stats::rank_percentile(current_spread, &spreads),
                pair,
            });
        }

        comparisons.sort_by(|a, b| b.vs_avg.total_cmp(&a.vs_avg));
        comparisons.truncate(config.top_n);
        comparisons
    }

    /// [`compare_with`](Self::compare_with) using the newest hour in the window.
    #[must_use]
    pub fn compare_latest(&self, config: &ComparisonConfig) -> Vec<HistoricalComparison> {
        match self.latest() {
            Some(latest) => self.compare_with(latest, config),
            None => Vec::new(),
        }
    }

    fn volume_profile(&self, base_volumes: &[f64], divine_volumes: &[f64]) -> VolumeProfile {
        VolumeProfile {
            avg_base: stats::nonzero_mean(base_volumes),
            avg_divine: stats::nonzero_mean(divine_volumes),
            divine_to_base_ratio: self.divine_to_base_ratio,
        }
    }
}

/// Average traded volume of a pair over some hours.
struct VolumeProfile {
    avg_base: f64,
    avg_divine: f64,
    divine_to_base_ratio: f64,
}

impl VolumeProfile {
    /// Larger of the base average and the divine average in base units.
    fn base_equivalent(&self) -> f64 {
        self.avg_base.max(self.avg_divine * self.divine_to_base_ratio)
    }
}

fn fold_history(analyzers: &[HourAnalyzer], base: BaseCurrency) -> BTreeMap<PairId, MarketHistory> {
    let mut history: BTreeMap<PairId, MarketHistory> = BTreeMap::new();

    for (hour_index, analyzer) in analyzers.iter().enumerate() {
        for (pair, edge) in analyzer.canonical_edges() {
            let Some(spread) = edge.spread() else {
                continue;
            };
            if !spread.is_finite() {
                warn!(pair = %pair, hour = hour_index, "Non-finite spread, skipping hour");
                continue;
            }

            let point = SpreadPoint {
                hour_index,
                spread,
                min_price: edge.min_price,
                max_price: edge.max_price,
                volume: edge.volume.clone(),
            };
            history.entry(pair).or_default().record(
                point,
                edge.volume_of(base.as_str()),
                edge.volume_of(DIVINE),
            );
        }
    }

    history
}
