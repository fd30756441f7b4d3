//! Handler for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    output::success("Configuration is valid");
    output::field("Path", path.display());
    output::field("League", &config.league);
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    if output::is_json() {
        output::report("config", &config);
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("League", &config.league);
    output::field("Realm", config.realm);
    output::field("Base currency", config.realm.base_currency().display_name());

    output::section("Data");
    output::field("Directory", config.data.dir.display());
    output::field("Hours back", config.data.hours_back);
    output::field(
        "Trend",
        if config.trend.enabled {
            format!("{} hours", config.trend.hours)
        } else {
            "disabled".to_string()
        },
    );

    let analysis = &config.analysis;
    output::section("Single hour");
    output::field("Notional", analysis.market.notional);
    output::field(
        "Spread",
        format!(
            "> {:.1}%, top {}",
            analysis.spread.threshold * 100.0,
            analysis.spread.top_n
        ),
    );
    output::field(
        "Triangular",
        format!(
            "liquidity >= p{:.0}, top {}",
            analysis.triangular.min_percentile, analysis.triangular.top_n
        ),
    );

    output::section("Multi hour");
    output::field(
        "Persistence",
        format!(
            ">= {:.1}% in {:.0}% of hours, volume >= {}",
            analysis.persistence.min_spread * 100.0,
            analysis.persistence.threshold * 100.0,
            analysis.persistence.min_avg_volume
        ),
    );
    output::field(
        "Trending",
        format!(
            "last {} hours, volume >= {}",
            analysis.trending.lookback_hours, analysis.trending.min_avg_volume
        ),
    );
    output::field(
        "Comparison",
        format!(
            "current > {:.2}%, top {}",
            analysis.comparison.min_current_spread * 100.0,
            analysis.comparison.top_n
        ),
    );

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}
