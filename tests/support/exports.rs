//! Export directories on disk.

use std::path::{Path, PathBuf};

use cxscan::adapter::outbound::ExportDirectory;
use cxscan::domain::{HourStamp, HourlySnapshot, Realm};

/// 2023-11-14 22:00 UTC.
pub const CURRENT_HOUR: i64 = 1_699_999_200;

pub fn current_hour() -> HourStamp {
    HourStamp::floor(CURRENT_HOUR)
}

/// Write `snapshot` where an [`ExportDirectory`] for `realm` expects it.
pub fn write_export(dir: &Path, realm: Realm, hour: HourStamp, snapshot: &HourlySnapshot) -> PathBuf {
    let path = ExportDirectory::new(dir, realm).path_for(hour);
    let content = serde_json::to_string_pretty(snapshot).expect("encode snapshot");
    std::fs::write(&path, content).expect("write export");
    path
}

/// Write `snapshot` to an arbitrary file name inside `dir`.
pub fn write_file(dir: &Path, name: &str, snapshot: &HourlySnapshot) -> PathBuf {
    let path = dir.join(name);
    let content = serde_json::to_string(snapshot).expect("encode snapshot");
    std::fs::write(&path, content).expect("write export");
    path
}

/// Minimal configuration pointing at `data_dir`.
pub fn config_toml(data_dir: &Path, extra: &str) -> String {
    format!(
        "league = \"Standard\"\n\n[data]\ndir = {:?}\n\n{extra}\n",
        data_dir.display().to_string()
    )
}

pub fn write_config(dir: &Path, data_dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, config_toml(data_dir, extra)).expect("write config");
    path
}
