//! Single-hour analysis over realistic snapshots.

mod support;

use cxscan::application::analysis::{SpreadConfig, TriangularConfig};
use cxscan::application::{AnalysisConfig, AnalysisService, HourAnalyzer, LoadedHour, MarketScope};
use cxscan::domain::{BaseCurrency, HourlySnapshot, Realm, SkipCounts};
use cxscan::port::{Event, NotifierRegistry};

use support::assertions::assert_near;
use support::notifier::RecordingNotifier;
use support::snapshot::{market, sample_hour, snapshot, LEAGUE};

fn service() -> AnalysisService {
    AnalysisService::new(MarketScope::new(LEAGUE, Realm::Pc), AnalysisConfig::default())
}

fn analyzer(snapshot: &HourlySnapshot) -> HourAnalyzer {
    let scope = MarketScope::new(LEAGUE, Realm::Pc);
    HourAnalyzer::from_snapshot(
        snapshot,
        &scope.graph_builder(),
        scope.base_currency(),
        &AnalysisConfig::default().market,
    )
}

fn unsampled(snapshot: HourlySnapshot) -> LoadedHour {
    LoadedHour {
        hour: None,
        snapshot,
    }
}

#[test]
fn report_counts_records_and_skips() {
    let report = service().analyze_hour(&unsampled(sample_hour()));

    assert_eq!(report.records, 8);
    assert_eq!(report.currencies, 4);
    assert_eq!(report.pairs, 4);
    assert_eq!(
        report.skipped,
        SkipCounts {
            wrong_league: 1,
            invalid_id: 1,
            missing_ratios: 1,
            zero_ratio: 1,
        }
    );
    assert_eq!(report.base_currency, BaseCurrency::Chaos);
    assert_near(report.divine_to_base_ratio, 250.0);
}

#[test]
fn spreads_rank_widest_first_with_values() {
    let report = service().analyze_hour(&unsampled(sample_hour()));
    let markets: Vec<String> = report
        .spreads
        .iter()
        .map(|s| format!("{}|{}", s.from, s.to))
        .collect();

    // fusing|chaos is 1% wide and stays under the 2% threshold
    assert_eq!(markets, ["alch|chaos", "divine|chaos", "alch|fusing"]);

    let alch = &report.spreads[0];
    assert_near(alch.spread, 0.33 / 0.30 - 1.0);
    assert_near(alch.percentile, 50.0);
    assert_near(alch.base_value.unwrap(), 100.0 * (0.33 / 0.30 - 1.0));

    let divine = &report.spreads[1];
    assert_near(divine.percentile, 75.0);
    assert_near(divine.divine_volume, 40.0);

    // fusing priced back into chaos at 0.50
    let cross = &report.spreads[2];
    assert_near(cross.percentile, 0.0);
    assert_near(cross.base_value.unwrap(), 100.0 * 0.50 * (0.72 / 0.70 - 1.0));
}

#[test]
fn spread_threshold_and_top_n_apply() {
    let analyzer = analyzer(&sample_hour());

    let wide = analyzer.spread_opportunities(&SpreadConfig {
        threshold: 0.09,
        ..SpreadConfig::default()
    });
    assert_eq!(wide.len(), 1);
    assert_eq!(wide[0].from.as_str(), "alch");

    let everything = analyzer.spread_opportunities(&SpreadConfig {
        threshold: 0.0,
        hide_zero_volume: false,
        top_n: 2,
    });
    assert_eq!(everything.len(), 2);
}

#[test]
fn illiquid_cycle_is_dropped_by_default() {
    let report = service().analyze_hour(&unsampled(sample_hour()));
    // the only profitable cycle runs through the thinnest market
    assert!(report.triangular.is_empty());
}

#[test]
fn cycle_found_when_percentile_floor_lowered() {
    let cycles = analyzer(&sample_hour()).triangular_opportunities(&TriangularConfig {
        min_percentile: 0.0,
        ..TriangularConfig::default()
    });

    assert_eq!(cycles.len(), 1);
    let cycle = &cycles[0];
    let path: Vec<&str> = cycle.path.iter().map(|c| c.as_str()).collect();
    assert_eq!(path, ["chaos", "alch", "fusing"]);

    let expected = (1.0 / 0.33) * 0.70 * 0.50 - 1.0;
    assert_near(cycle.inefficiency, expected);
    assert_near(cycle.final_amount(), expected + 1.0);
    assert_near(cycle.volume_percentile, 0.0);
    assert_near(cycle.base_volume, 500.0);
    assert_near(cycle.base_value, 100.0 * expected);
}

#[test]
fn volume_stats_cover_base_and_divine() {
    let report = service().analyze_hour(&unsampled(sample_hour()));

    let base = report.volume.base.as_ref().unwrap();
    assert_near(base.mean, 2687.5);
    assert_near(base.median, 350.0);
    let top: Vec<f64> = base.top_markets.iter().map(|m| m.base_volume).collect();
    assert_eq!(top, [10_000.0, 500.0, 200.0, 50.0]);

    let divine = report.volume.divine.as_ref().unwrap();
    assert_eq!(divine.top_markets.len(), 1);
    assert_near(divine.mean, 40.0);
}

#[test]
fn exalted_realm_uses_exalted_base() {
    let hour = snapshot(vec![
        market("divine|exalted", 28.0, 32.0).with_volume("exalted", 900.0),
        market("regal|exalted", 0.5, 0.6).with_volume("exalted", 300.0),
    ]);
    let service = AnalysisService::new(MarketScope::new(LEAGUE, Realm::Poe2), AnalysisConfig::default());

    let report = service.analyze_hour(&unsampled(hour));
    assert_eq!(report.base_currency, BaseCurrency::Exalted);
    assert_near(report.divine_to_base_ratio, 30.0);
    assert_eq!(report.spreads[0].from.as_str(), "regal");
    assert_near(report.spreads[0].base_value.unwrap(), 100.0 * (0.6 / 0.5 - 1.0));
}

#[test]
fn missing_divine_market_falls_back() {
    let hour = snapshot(vec![market("alch|chaos", 0.30, 0.33).with_volume("chaos", 500.0)]);
    let report = service().analyze_hour(&unsampled(hour));
    assert_near(report.divine_to_base_ratio, 250.0);

    let hour = snapshot(vec![market("regal|exalted", 0.5, 0.6)]);
    let service = AnalysisService::new(MarketScope::new(LEAGUE, Realm::Poe2), AnalysisConfig::default());
    assert_near(service.analyze_hour(&unsampled(hour)).divine_to_base_ratio, 30.0);
}

#[test]
fn empty_snapshot_yields_empty_report() {
    let report = service().analyze_hour(&unsampled(HourlySnapshot::default()));
    assert_eq!(report.pairs, 0);
    assert!(report.spreads.is_empty());
    assert!(report.triangular.is_empty());
    assert!(report.volume.is_empty());
}

#[test]
fn export_payload_decodes_with_unknown_fields() {
    let payload = r#"{
        "exported_at": "2023-11-14T22:00:00Z",
        "markets": [{
            "league": "Standard",
            "market_id": "alch|chaos",
            "lowest_ratio": {"alch": 10, "chaos": 3.3},
            "highest_ratio": {"alch": 10, "chaos": 3.0},
            "volume_traded": {"chaos": 500},
            "extra": true
        }]
    }"#;
    let snapshot = HourlySnapshot::from_json(payload).unwrap();
    let report = service().analyze_hour(&unsampled(snapshot));

    assert_eq!(report.pairs, 1);
    assert_near(report.spreads[0].min_price, 0.30);
    assert_near(report.spreads[0].max_price, 0.33);
}

#[test]
fn hour_events_are_published() {
    let recorder = RecordingNotifier::new();
    let mut notifiers = NotifierRegistry::new();
    notifiers.register(Box::new(recorder.clone()));
    let config = AnalysisConfig {
        triangular: TriangularConfig {
            min_percentile: 0.0,
            ..TriangularConfig::default()
        },
        ..AnalysisConfig::default()
    };
    let service =
        AnalysisService::new(MarketScope::new(LEAGUE, Realm::Pc), config).with_notifiers(notifiers);

    service.analyze_hour(&unsampled(sample_hour()));

    assert_eq!(recorder.count(|e| matches!(e, Event::HourAnalyzed(_))), 1);
    assert_eq!(recorder.count(|e| matches!(e, Event::SpreadDetected(_))), 3);
    let cycles: Vec<String> = recorder
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::CycleDetected(cycle) => Some(cycle.path),
            _ => None,
        })
        .collect();
    assert_eq!(cycles, ["chaos->alch->fusing->chaos"]);
}
