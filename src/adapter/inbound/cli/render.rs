//! Tables and JSON lines for analysis reports.
//!
//! All number formatting lives here; the reports themselves carry raw
//! values.

use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::{HourReport, TrendReport};
use crate::domain::{
    CurrencyVolumeStats, HistoricalComparison, PersistentMarket, SpreadOpportunity,
    TrendingMarket, TriangularOpportunity, DIVINE,
};

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn signed_percent(value: f64) -> String {
    format!("{:+.2}%", value * 100.0)
}

fn price(value: f64) -> String {
    if value >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.4}")
    }
}

fn volume(value: f64) -> String {
    if value == 0.0 {
        "-".to_string()
    } else {
        format!("{value:.0}")
    }
}

fn rank(percentile: f64) -> String {
    format!("p{percentile:.0}")
}

#[derive(Tabled)]
struct SpreadRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Spread")]
    spread: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Liquidity")]
    liquidity: String,
    #[tabled(rename = "Base Vol")]
    base_volume: String,
    #[tabled(rename = "Divine Vol")]
    divine_volume: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&SpreadOpportunity> for SpreadRow {
    fn from(opp: &SpreadOpportunity) -> Self {
        Self {
            market: format!("{} → {}", opp.from, opp.to),
            spread: percent(opp.spread),
            min: price(opp.min_price),
            max: price(opp.max_price),
            liquidity: rank(opp.percentile),
            base_volume: volume(opp.base_volume),
            divine_volume: volume(opp.divine_volume),
            value: opp
                .base_value
                .map_or_else(|| "-".to_string(), |v| format!("{v:.2}")),
        }
    }
}

#[derive(Tabled)]
struct CycleRow {
    #[tabled(rename = "Cycle")]
    path: String,
    #[tabled(rename = "Return")]
    inefficiency: String,
    #[tabled(rename = "Legs")]
    legs: String,
    #[tabled(rename = "Liquidity")]
    liquidity: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&TriangularOpportunity> for CycleRow {
    fn from(opp: &TriangularOpportunity) -> Self {
        let [a, b, c] = &opp.path;
        Self {
            path: format!("{a} → {b} → {c} → {a}"),
            inefficiency: percent(opp.inefficiency),
            legs: opp
                .steps
                .iter()
                .map(|step| price(*step))
                .collect::<Vec<_>>()
                .join(" × "),
            liquidity: rank(opp.volume_percentile),
            value: format!("{:.2}", opp.base_value),
        }
    }
}

#[derive(Tabled)]
struct VolumeRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Volume")]
    volume: String,
}

#[derive(Tabled)]
struct PersistentRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Avg Spread")]
    avg_spread: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Std Dev")]
    std_dev: String,
    #[tabled(rename = "Base Vol")]
    base_volume: String,
    #[tabled(rename = "Divine Vol")]
    divine_volume: String,
    #[tabled(rename = "Active")]
    consistency: String,
    #[tabled(rename = "Score")]
    score: String,
}

impl From<&PersistentMarket> for PersistentRow {
    fn from(market: &PersistentMarket) -> Self {
        Self {
            market: market.pair.to_string(),
            hours: format!("{}/{}", market.hours_with_spread, market.total_hours),
            avg_spread: percent(market.avg_spread),
            range: format!("{} – {}", percent(market.min_spread), percent(market.max_spread)),
            std_dev: percent(market.std_dev),
            base_volume: volume(market.avg_base_volume),
            divine_volume: volume(market.avg_divine_volume),
            consistency: format!("{:.0}%", market.volume_consistency * 100.0),
            score: format!("{:.4}", market.score),
        }
    }
}

#[derive(Tabled)]
struct TrendingRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Slope/h")]
    slope: String,
    #[tabled(rename = "Latest")]
    latest: String,
    #[tabled(rename = "Recent Avg")]
    recent: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Base Vol")]
    base_volume: String,
    #[tabled(rename = "Divine Vol")]
    divine_volume: String,
}

impl From<&TrendingMarket> for TrendingRow {
    fn from(market: &TrendingMarket) -> Self {
        Self {
            market: market.pair.to_string(),
            slope: signed_percent(market.trend_slope),
            latest: percent(market.latest_spread),
            recent: percent(market.avg_recent_spread),
            change: signed_percent(market.spread_change),
            base_volume: volume(market.avg_base_volume),
            divine_volume: volume(market.avg_divine_volume),
        }
    }
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Avg")]
    avg: String,
    #[tabled(rename = "Median")]
    median: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "vs Avg")]
    vs_avg: String,
    #[tabled(rename = "Rank")]
    percentile: String,
    #[tabled(rename = "Hours")]
    hours: usize,
}

impl From<&HistoricalComparison> for ComparisonRow {
    fn from(comparison: &HistoricalComparison) -> Self {
        Self {
            market: comparison.pair.to_string(),
            current: percent(comparison.current_spread),
            avg: percent(comparison.historical_avg),
            median: percent(comparison.historical_median),
            max: percent(comparison.historical_max),
            vs_avg: signed_percent(comparison.vs_avg),
            percentile: rank(comparison.percentile),
            hours: comparison.hours_tracked,
        }
    }
}

fn table<T: Tabled>(rows: Vec<T>, empty: &str) {
    if rows.is_empty() {
        output::note(empty);
    } else {
        output::lines(&Table::new(rows).to_string());
    }
}

/// Render a single-hour report.
pub fn hour_report(report: &HourReport) {
    if output::is_json() {
        output::report("hour", report);
        return;
    }

    let title = report
        .hour
        .map_or_else(|| "Snapshot".to_string(), |hour| format!("Hour {hour}"));
    output::section(&title);
    output::field("League", &report.league);
    output::field("Base currency", report.base_currency.display_name());
    output::field("Records", report.records);
    output::field(
        "Markets",
        format!("{} pairs, {} currencies", report.pairs, report.currencies),
    );
    if report.skipped.total() > 0 {
        let skipped = report.skipped;
        output::field(
            "Skipped",
            format!(
                "{} (league {}, id {}, ratios {}, zero {})",
                skipped.total(),
                skipped.wrong_league,
                skipped.invalid_id,
                skipped.missing_ratios,
                skipped.zero_ratio
            ),
        );
    }
    output::field(
        "Divine ratio",
        format!(
            "1 Divine ≈ {:.0} {}",
            report.divine_to_base_ratio,
            report.base_currency.display_name()
        ),
    );

    volume_section(
        report.base_currency.display_name(),
        report.base_currency.as_str(),
        report.volume.base.as_ref(),
    );
    volume_section("Divine", DIVINE, report.volume.divine.as_ref());

    output::section("Widest spreads");
    if let Some(best) = report.spreads.first() {
        output::field("Widest", output::highlight(percent(best.spread)));
    }
    table(
        report.spreads.iter().map(SpreadRow::from).collect(),
        "No spreads above threshold",
    );

    output::section(&format!(
        "Triangular cycles from {}",
        report.base_currency.display_name()
    ));
    table(
        report.triangular.iter().map(CycleRow::from).collect(),
        "No profitable cycles",
    );
}

fn volume_section(label: &str, currency: &str, stats: Option<&CurrencyVolumeStats>) {
    output::section(&format!("{label} volume"));
    let Some(stats) = stats else {
        output::note("No markets traded");
        return;
    };

    output::field("Mean", format!("{:.1}", stats.mean));
    output::field("Median", format!("{:.1}", stats.median));
    let rows: Vec<VolumeRow> = stats
        .top_markets
        .iter()
        .map(|market| VolumeRow {
            market: market
                .counterpart(currency)
                .map_or_else(|| format!("{}|{}", market.from, market.to), ToString::to_string),
            volume: format!("{:.0}", market.volume_of(currency)),
        })
        .collect();
    table(rows, "No markets traded");
}

/// Render a multi-hour report.
pub fn trend_report(report: &TrendReport) {
    if output::is_json() {
        output::report("trend", report);
        return;
    }

    output::section(&format!("Trend over {} hours", report.hours_analyzed));
    if !report.missing_hours.is_empty() {
        output::warning(&format!(
            "{} hour(s) missing from the window",
            report.missing_hours.len()
        ));
    }
    output::field(
        "Divine ratio",
        format!("{:.0} (median)", report.divine_to_base_ratio),
    );

    output::section("Persistent spreads");
    table(
        report.persistent.iter().map(PersistentRow::from).collect(),
        "No persistent spreads",
    );

    output::section(&format!(
        "Widening spreads (last {} hours)",
        report.lookback_hours
    ));
    table(
        report.trending.iter().map(TrendingRow::from).collect(),
        "No widening spreads",
    );

    output::section("Current hour vs history");
    table(
        report.comparison.iter().map(ComparisonRow::from).collect(),
        "No comparable markets",
    );
}
