//! Hourly exports stored as JSON files in a directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{HourStamp, HourlySnapshot, Realm};
use crate::error::Result;
use crate::port::SnapshotSource;

const FILE_PREFIX: &str = "currency_exchange_markets";

/// Read-only view of an export directory for one realm.
#[derive(Debug, Clone)]
pub struct ExportDirectory {
    dir: PathBuf,
    realm: Realm,
}

impl ExportDirectory {
    pub fn new(dir: impl Into<PathBuf>, realm: Realm) -> Self {
        Self {
            dir: dir.into(),
            realm,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `currency_exchange_markets[_<realm>]_<timestamp>.json`
    #[must_use]
    pub fn file_name(&self, hour: HourStamp) -> String {
        match self.realm.export_suffix() {
            Some(realm) => format!("{FILE_PREFIX}_{realm}_{}.json", hour.timestamp()),
            None => format!("{FILE_PREFIX}_{}.json", hour.timestamp()),
        }
    }

    #[must_use]
    pub fn path_for(&self, hour: HourStamp) -> PathBuf {
        self.dir.join(self.file_name(hour))
    }
}

impl SnapshotSource for ExportDirectory {
    fn load(&self, hour: HourStamp) -> Result<Option<HourlySnapshot>> {
        let path = self.path_for(hour);
        if !path.is_file() {
            debug!(path = %path.display(), "Export not found");
            return Ok(None);
        }

        let snapshot = HourlySnapshot::from_path(&path)?;
        debug!(path = %path.display(), records = snapshot.len(), "Export loaded");
        Ok(Some(snapshot))
    }
}
