//! Configuration files on disk.

use std::path::PathBuf;

use cxscan::domain::{BaseCurrency, Realm};
use cxscan::error::{ConfigError, Error};
use cxscan::infrastructure::config::Config;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn full_config_round_trips_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
league = "Settlers"
realm = "xbox"

[data]
dir = "/var/lib/exports"
hours_back = 2

[trend]
hours = 12

[analysis.market]
notional = 500.0

[analysis.spread]
threshold = 0.05
top_n = 3

[analysis.triangular]
hide_zero_volume = false
min_percentile = 25.0

[analysis.persistence]
min_spread = 0.03
threshold = 0.75

[analysis.trending]
lookback_hours = 4

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.league, "Settlers");
    assert_eq!(config.realm, Realm::Xbox);
    assert_eq!(config.scope().base_currency(), BaseCurrency::Chaos);
    assert_eq!(config.data.dir, PathBuf::from("/var/lib/exports"));
    assert_eq!(config.data.hours_back, 2);
    assert_eq!(config.trend.hours, 12);
    assert!(config.trend.enabled);
    assert_eq!(config.analysis.market.notional, 500.0);
    assert_eq!(config.analysis.spread.top_n, 3);
    assert!(!config.analysis.triangular.hide_zero_volume);
    assert_eq!(config.analysis.persistence.threshold, 0.75);
    // untouched fields keep their defaults
    assert_eq!(config.analysis.persistence.min_avg_volume, 100.0);
    assert_eq!(config.analysis.trending.lookback_hours, 4);
    assert_eq!(config.analysis.comparison.top_n, 10);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn short_lookback_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
league = "Standard"

[analysis.trending]
lookback_hours = 1
"#,
    );

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "analysis.trending.lookback_hours",
            ..
        })) => {}
        other => panic!("expected lookback to be rejected, got {other:?}"),
    }
}

#[test]
fn unknown_realm_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "league = \"Standard\"\nrealm = \"switch\"\n");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn blank_league_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "league = \"  \"\n");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::MissingField { field: "league" }))
    ));
}

#[test]
fn example_config_matches_defaults() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.toml.example");
    let example = Config::load(&path).unwrap();
    let minimal = Config::parse_toml("league = \"Standard\"").unwrap();
    assert_eq!(example, minimal);
}
