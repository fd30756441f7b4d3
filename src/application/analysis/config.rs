//! Threshold configuration for the hourly and multi-hour analyses.
//!
//! Every section is optional in the TOML file; missing fields take the
//! defaults below.

use serde::{Deserialize, Serialize};

use crate::domain::BaseCurrency;

/// All analysis thresholds, grouped by analysis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub spread: SpreadConfig,
    #[serde(default)]
    pub triangular: TriangularConfig,
    #[serde(default)]
    pub volume: VolumeConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub trending: TrendingConfig,
    #[serde(default)]
    pub comparison: ComparisonConfig,
}

/// Settings shared by every analysis of a market.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Hypothetical base-currency investment used for value estimates.
    #[serde(default = "default_notional")]
    pub notional: f64,

    /// Chaos per divine when no direct market traded.
    #[serde(default = "default_divine_chaos_fallback")]
    pub divine_chaos_fallback: f64,

    /// Exalted per divine when no direct market traded.
    #[serde(default = "default_divine_exalted_fallback")]
    pub divine_exalted_fallback: f64,
}

const fn default_notional() -> f64 {
    100.0
}

const fn default_divine_chaos_fallback() -> f64 {
    250.0
}

const fn default_divine_exalted_fallback() -> f64 {
    30.0
}

impl MarketConfig {
    /// Fallback divine ratio for the given base currency.
    #[must_use]
    pub const fn fallback_divine_ratio(&self, base: BaseCurrency) -> f64 {
        match base {
            BaseCurrency::Chaos => self.divine_chaos_fallback,
            BaseCurrency::Exalted => self.divine_exalted_fallback,
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            notional: default_notional(),
            divine_chaos_fallback: default_divine_chaos_fallback(),
            divine_exalted_fallback: default_divine_exalted_fallback(),
        }
    }
}

/// Spread-width ranking.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpreadConfig {
    /// Pairs need `spread > threshold`.
    #[serde(default = "default_spread_threshold")]
    pub threshold: f64,

    /// Drop pairs with neither base nor divine volume.
    #[serde(default = "default_true")]
    pub hide_zero_volume: bool,

    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

const fn default_spread_threshold() -> f64 {
    0.02
}

const fn default_true() -> bool {
    true
}

const fn default_top_n() -> usize {
    10
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            threshold: default_spread_threshold(),
            hide_zero_volume: default_true(),
            top_n: default_top_n(),
        }
    }
}

/// Triangular-cycle detection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TriangularConfig {
    /// Drop cycles where any leg has neither base nor divine volume.
    #[serde(default = "default_true")]
    pub hide_zero_volume: bool,

    /// Cycles whose least liquid leg ranks below this percentile are dropped.
    #[serde(default = "default_min_percentile")]
    pub min_percentile: f64,

    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

const fn default_min_percentile() -> f64 {
    10.0
}

impl Default for TriangularConfig {
    fn default() -> Self {
        Self {
            hide_zero_volume: default_true(),
            min_percentile: default_min_percentile(),
            top_n: default_top_n(),
        }
    }
}

/// Volume statistics reporting.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VolumeConfig {
    #[serde(default = "default_volume_top_n")]
    pub top_n: usize,
}

const fn default_volume_top_n() -> usize {
    5
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            top_n: default_volume_top_n(),
        }
    }
}

/// Persistent-spread detection across hours.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PersistenceConfig {
    /// An hour counts towards persistence when `spread >= min_spread`.
    #[serde(default = "default_spread_threshold")]
    pub min_spread: f64,

    /// Minimum fraction of recorded hours that must meet `min_spread`.
    #[serde(default = "default_persistence_threshold")]
    pub threshold: f64,

    /// Minimum average volume in base-currency equivalents.
    #[serde(default = "default_min_avg_volume")]
    pub min_avg_volume: f64,

    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

const fn default_persistence_threshold() -> f64 {
    0.5
}

const fn default_min_avg_volume() -> f64 {
    100.0
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            min_spread: default_spread_threshold(),
            threshold: default_persistence_threshold(),
            min_avg_volume: default_min_avg_volume(),
            top_n: default_top_n(),
        }
    }
}

/// Widening-spread detection over the most recent hours.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrendingConfig {
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: usize,

    /// Minimum average volume in base-currency equivalents over the window.
    #[serde(default = "default_min_avg_volume")]
    pub min_avg_volume: f64,

    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

const fn default_lookback_hours() -> usize {
    6
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            lookback_hours: default_lookback_hours(),
            min_avg_volume: default_min_avg_volume(),
            top_n: default_top_n(),
        }
    }
}

/// Current hour against the pair's history.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ComparisonConfig {
    /// Pairs need a current spread above this to be compared.
    #[serde(default = "default_min_current_spread")]
    pub min_current_spread: f64,

    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

const fn default_min_current_spread() -> f64 {
    0.001
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            min_current_spread: default_min_current_spread(),
            top_n: default_top_n(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_sections_fill_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
[spread]
threshold = 0.05

[trending]
lookback_hours = 12
"#,
        )
        .unwrap();

        assert_eq!(config.spread.threshold, 0.05);
        assert!(config.spread.hide_zero_volume);
        assert_eq!(config.spread.top_n, 10);
        assert_eq!(config.trending.lookback_hours, 12);
        assert_eq!(config.trending.min_avg_volume, 100.0);
        assert_eq!(config.persistence, PersistenceConfig::default());
    }

    #[test]
    fn fallback_ratio_depends_on_base() {
        let market = MarketConfig::default();
        assert_eq!(market.fallback_divine_ratio(BaseCurrency::Chaos), 250.0);
        assert_eq!(market.fallback_divine_ratio(BaseCurrency::Exalted), 30.0);
    }
}
