//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Nothing
//! below the binary reads the environment; the loaded value is passed on
//! explicitly.
//!
//! # Example
//!
//! ```no_run
//! use cxscan::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::logging::{LoggingConfig, FORMATS};
use crate::application::{AnalysisConfig, MarketScope};
use crate::domain::Realm;
use crate::error::{ConfigError, Result};

/// Where hourly exports live and which hour counts as current.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// The current hour is this many hours before now; the newest export
    /// usually lags the clock.
    #[serde(default = "default_hours_back")]
    pub hours_back: u32,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data_exports")
}

const fn default_hours_back() -> u32 {
    1
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            hours_back: default_hours_back(),
        }
    }
}

/// Multi-hour analysis window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrendConfig {
    #[serde(default = "default_trend_enabled")]
    pub enabled: bool,

    /// Historical hours loaded before the current one.
    #[serde(default = "default_trend_hours")]
    pub hours: u32,
}

const fn default_trend_enabled() -> bool {
    true
}

const fn default_trend_hours() -> u32 {
    24
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            enabled: default_trend_enabled(),
            hours: default_trend_hours(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// League name, matched exactly against each record.
    #[serde(default)]
    pub league: String,

    #[serde(default)]
    pub realm: Realm,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub trend: TrendConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[must_use]
    pub fn scope(&self) -> MarketScope {
        MarketScope::new(self.league.clone(), self.realm)
    }

    fn validate(&self) -> Result<()> {
        if self.league.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "league" }.into());
        }

        if self.trend.enabled && self.trend.hours == 0 {
            return Err(ConfigError::InvalidValue {
                field: "trend.hours",
                reason: "must be at least 1 when trend analysis is enabled".to_string(),
            }
            .into());
        }

        let analysis = &self.analysis;
        for (field, value) in [
            ("analysis.market.divine_chaos_fallback", analysis.market.divine_chaos_fallback),
            ("analysis.market.divine_exalted_fallback", analysis.market.divine_exalted_fallback),
        ] {
            positive(field, value)?;
        }

        for (field, value) in [
            ("analysis.market.notional", analysis.market.notional),
            ("analysis.spread.threshold", analysis.spread.threshold),
            ("analysis.triangular.min_percentile", analysis.triangular.min_percentile),
            ("analysis.persistence.min_spread", analysis.persistence.min_spread),
            ("analysis.persistence.threshold", analysis.persistence.threshold),
            ("analysis.persistence.min_avg_volume", analysis.persistence.min_avg_volume),
            ("analysis.trending.min_avg_volume", analysis.trending.min_avg_volume),
            ("analysis.comparison.min_current_spread", analysis.comparison.min_current_spread),
        ] {
            non_negative(field, value)?;
        }

        if analysis.persistence.threshold > 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.persistence.threshold",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if analysis.triangular.min_percentile > 100.0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.triangular.min_percentile",
                reason: "must be between 0 and 100".to_string(),
            }
            .into());
        }
        if analysis.trending.lookback_hours < 2 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.trending.lookback_hours",
                reason: "must be at least 2".to_string(),
            }
            .into());
        }

        for (field, top_n) in [
            ("analysis.spread.top_n", analysis.spread.top_n),
            ("analysis.triangular.top_n", analysis.triangular.top_n),
            ("analysis.volume.top_n", analysis.volume.top_n),
            ("analysis.persistence.top_n", analysis.persistence.top_n),
            ("analysis.trending.top_n", analysis.trending.top_n),
            ("analysis.comparison.top_n", analysis.comparison.top_n),
        ] {
            if top_n == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        if !FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be one of {}", FORMATS.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be a finite number, 0 or greater".to_string(),
        }
        .into());
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}
