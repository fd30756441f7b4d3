//! Analysis use cases: load an hour window, analyse it, publish results.

use serde::Serialize;
use tracing::{info, warn};

use super::analysis::{AnalysisConfig, HourAnalyzer, TrendAggregator, TrendingConfig};
use crate::domain::{
    BaseCurrency, GraphBuilder, HistoricalComparison, HourStamp, HourlySnapshot,
    PersistentMarket, Realm, SkipCounts, SpreadOpportunity, TrendingMarket,
    TriangularOpportunity, VolumeStats,
};
use crate::error::{Error, Result};
use crate::port::{
    CycleEvent, Event, HourEvent, NotifierRegistry, SnapshotSource, SpreadEvent, TrendEvent,
};

/// League and realm being analysed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketScope {
    pub league: String,
    pub realm: Realm,
}

impl MarketScope {
    pub fn new(league: impl Into<String>, realm: Realm) -> Self {
        Self {
            league: league.into(),
            realm,
        }
    }

    #[must_use]
    pub const fn base_currency(&self) -> BaseCurrency {
        self.realm.base_currency()
    }

    #[must_use]
    pub fn graph_builder(&self) -> GraphBuilder {
        GraphBuilder::new(self.league.clone())
    }
}

/// A snapshot together with the hour it was exported for, if known.
#[derive(Debug, Clone)]
pub struct LoadedHour {
    pub hour: Option<HourStamp>,
    pub snapshot: HourlySnapshot,
}

/// Consecutive hours, oldest first. The last entry is the current hour.
#[derive(Debug, Clone, Default)]
pub struct HourWindow {
    pub hours: Vec<LoadedHour>,
    /// Requested hours that had no usable export.
    pub missing: Vec<HourStamp>,
}

impl HourWindow {
    /// Window over snapshots with no hour information, oldest first.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<HourlySnapshot>) -> Self {
        Self {
            hours: snapshots
                .into_iter()
                .map(|snapshot| LoadedHour {
                    hour: None,
                    snapshot,
                })
                .collect(),
            missing: Vec::new(),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&LoadedHour> {
        self.hours.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    fn snapshots(&self) -> Vec<HourlySnapshot> {
        self.hours.iter().map(|h| h.snapshot.clone()).collect()
    }
}

/// Everything found in a single hour.
#[derive(Debug, Clone, Serialize)]
pub struct HourReport {
    pub hour: Option<HourStamp>,
    pub league: String,
    pub base_currency: BaseCurrency,
    pub records: usize,
    pub currencies: usize,
    pub pairs: usize,
    pub skipped: SkipCounts,
    pub divine_to_base_ratio: f64,
    pub volume: VolumeStats,
    pub spreads: Vec<SpreadOpportunity>,
    pub triangular: Vec<TriangularOpportunity>,
}

/// Everything found across a window of hours.
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub hours_analyzed: usize,
    pub missing_hours: Vec<HourStamp>,
    pub divine_to_base_ratio: f64,
    /// Lookback actually used after clamping to the loaded hours.
    pub lookback_hours: usize,
    pub persistent: Vec<PersistentMarket>,
    pub trending: Vec<TrendingMarket>,
    pub comparison: Vec<HistoricalComparison>,
}

/// Runs the analyses for one league and publishes their results.
pub struct AnalysisService {
    scope: MarketScope,
    config: AnalysisConfig,
    notifiers: NotifierRegistry,
}

impl AnalysisService {
    #[must_use]
    pub fn new(scope: MarketScope, config: AnalysisConfig) -> Self {
        Self {
            scope,
            config,
            notifiers: NotifierRegistry::new(),
        }
    }

    #[must_use]
    pub fn with_notifiers(mut self, notifiers: NotifierRegistry) -> Self {
        self.notifiers = notifiers;
        self
    }

    #[must_use]
    pub const fn scope(&self) -> &MarketScope {
        &self.scope
    }

    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load `trend_hours` hours before `current`, oldest first, then
    /// `current` itself.
    ///
    /// Historical hours that are missing or fail to load are skipped with a
    /// warning. The current hour is required.
    pub fn load_window(
        &self,
        source: &dyn SnapshotSource,
        current: HourStamp,
        trend_hours: u32,
    ) -> Result<HourWindow> {
        let mut window = HourWindow::default();

        for offset in (1..=trend_hours).rev() {
            let hour = current.hours_before(offset);
            match source.load(hour) {
                Ok(Some(snapshot)) => window.hours.push(LoadedHour {
                    hour: Some(hour),
                    snapshot,
                }),
                Ok(None) => {
                    warn!(hour = %hour, "No export for hour, skipping");
                    self.hour_missing(&mut window, hour);
                }
                Err(e) => {
                    warn!(hour = %hour, error = %e, "Failed to load hour, skipping");
                    self.hour_missing(&mut window, hour);
                }
            }
        }

        let snapshot = source
            .load(current)?
            .ok_or_else(|| Error::InsufficientData(format!("no export for current hour {current}")))?;
        window.hours.push(LoadedHour {
            hour: Some(current),
            snapshot,
        });

        info!(
            loaded = window.len(),
            missing = window.missing.len(),
            current = %current,
            "Hour window loaded"
        );
        Ok(window)
    }

    fn hour_missing(&self, window: &mut HourWindow, hour: HourStamp) {
        window.missing.push(hour);
        self.notifiers.notify_all(Event::HourMissing { hour });
    }

    /// Build and analyse one hour.
    #[must_use]
    pub fn analyze_hour(&self, loaded: &LoadedHour) -> HourReport {
        let base = self.scope.base_currency();
        let analyzer = HourAnalyzer::from_snapshot(
            &loaded.snapshot,
            &self.scope.graph_builder(),
            base,
            &self.config.market,
        );
        let graph = analyzer.graph();

        let report = HourReport {
            hour: loaded.hour,
            league: self.scope.league.clone(),
            base_currency: base,
            records: loaded.snapshot.len(),
            currencies: graph.currencies().len(),
            pairs: graph.pair_count(),
            skipped: graph.skipped(),
            divine_to_base_ratio: analyzer.divine_to_base_ratio(),
            volume: analyzer.volume_stats(self.config.volume.top_n),
            spreads: analyzer.spread_opportunities(&self.config.spread),
            triangular: analyzer.triangular_opportunities(&self.config.triangular),
        };

        self.publish_hour(&report);
        report
    }

    fn publish_hour(&self, report: &HourReport) {
        self.notifiers.notify_all(Event::HourAnalyzed(HourEvent {
            hour: report.hour,
            records: report.records,
            currencies: report.currencies,
            pairs: report.pairs,
            skipped: report.skipped,
            divine_to_base_ratio: report.divine_to_base_ratio,
        }));
        for spread in &report.spreads {
            self.notifiers
                .notify_all(Event::SpreadDetected(SpreadEvent::from(spread)));
        }
        for cycle in &report.triangular {
            self.notifiers
                .notify_all(Event::CycleDetected(CycleEvent::from(cycle)));
        }
    }

    /// Multi-hour analysis of the window, `None` with fewer than two hours.
    #[must_use]
    pub fn analyze_trend(&self, window: &HourWindow) -> Option<TrendReport> {
        if window.len() < TrendAggregator::MIN_HOURS {
            info!(
                hours = window.len(),
                "Not enough hours for trend analysis"
            );
            return None;
        }

        let aggregator = TrendAggregator::from_snapshots(
            &window.snapshots(),
            &self.scope.graph_builder(),
            self.scope.base_currency(),
            &self.config.market,
        );

        let lookback_hours = self.config.trending.lookback_hours.min(aggregator.hours_analyzed());
        let trending_config = TrendingConfig {
            lookback_hours,
            ..self.config.trending.clone()
        };

        let report = TrendReport {
            hours_analyzed: aggregator.hours_analyzed(),
            missing_hours: window.missing.clone(),
            divine_to_base_ratio: aggregator.divine_to_base_ratio(),
            lookback_hours,
            persistent: aggregator.persistent_markets(&self.config.persistence),
            trending: aggregator.trending_markets(&trending_config),
            comparison: aggregator.compare_latest(&self.config.comparison),
        };

        self.notifiers.notify_all(Event::TrendAnalyzed(TrendEvent {
            hours_analyzed: report.hours_analyzed,
            hours_missing: report.missing_hours.len(),
            persistent: report.persistent.len(),
            trending: report.trending.len(),
            above_average: report
                .comparison
                .iter()
                .filter(|c| c.is_above_average())
                .count(),
            top_persistent: report.persistent.first().map(|m| m.pair.to_string()),
            top_trending: report.trending.first().map(|m| m.pair.to_string()),
        }));

        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawMarketRecord;
    use crate::port::{Event, Notifier};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct MapSource(HashMap<HourStamp, HourlySnapshot>);

    impl SnapshotSource for MapSource {
        fn load(&self, hour: HourStamp) -> Result<Option<HourlySnapshot>> {
            Ok(self.0.get(&hour).cloned())
        }
    }

    struct Recorder(Arc<Mutex<Vec<Event>>>);

    impl Notifier for Recorder {
        fn notify(&self, event: Event) {
            if let Ok(mut events) = self.0.lock() {
                events.push(event);
            }
        }
    }

    fn snapshot(spread: f64) -> HourlySnapshot {
        HourlySnapshot::new(vec![RawMarketRecord::new("Standard", "alch|chaos")
            .with_lowest(("alch", 1.0), ("chaos", 1.0 + spread))
            .with_highest(("alch", 1.0), ("chaos", 1.0))
            .with_volume("chaos", 500.0)])
    }

    fn service() -> AnalysisService {
        AnalysisService::new(
            MarketScope::new("Standard", Realm::Pc),
            AnalysisConfig::default(),
        )
    }

    #[test]
    fn window_skips_missing_hours() {
        let current = HourStamp::floor(36_000);
        let source = MapSource(HashMap::from([
            (current.hours_before(3), snapshot(0.03)),
            (current.hours_before(1), snapshot(0.04)),
            (current, snapshot(0.05)),
        ]));

        let window = service().load_window(&source, current, 3).unwrap();

        assert_eq!(window.len(), 3);
        assert_eq!(window.missing, vec![current.hours_before(2)]);
        assert_eq!(window.current().and_then(|h| h.hour), Some(current));
        assert_eq!(window.hours[0].hour, Some(current.hours_before(3)));
    }

    #[test]
    fn window_requires_current_hour() {
        let current = HourStamp::floor(36_000);
        let source = MapSource(HashMap::from([(current.hours_before(1), snapshot(0.03))]));

        let result = service().load_window(&source, current, 1);
        assert!(matches!(result, Err(Error::InsufficientData(_))));
    }

    #[test]
    fn hour_report_publishes_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(Recorder(events.clone())));
        let service = service().with_notifiers(registry);

        let report = service.analyze_hour(&LoadedHour {
            hour: None,
            snapshot: snapshot(0.05),
        });

        assert_eq!(report.pairs, 1);
        assert_eq!(report.spreads.len(), 1);
        assert_eq!(report.base_currency, BaseCurrency::Chaos);

        let events = events.lock().unwrap();
        assert!(matches!(events[0], Event::HourAnalyzed(_)));
        assert!(matches!(events[1], Event::SpreadDetected(_)));
    }

    #[test]
    fn trend_needs_two_hours() {
        let single = HourWindow::from_snapshots(vec![snapshot(0.05)]);
        assert!(service().analyze_trend(&single).is_none());

        let window = HourWindow::from_snapshots(vec![snapshot(0.03), snapshot(0.05)]);
        let report = service().analyze_trend(&window).unwrap();
        assert_eq!(report.hours_analyzed, 2);
        assert_eq!(report.lookback_hours, 2);
        assert_eq!(report.persistent.len(), 1);
        assert_eq!(report.trending.len(), 1);
    }
}
