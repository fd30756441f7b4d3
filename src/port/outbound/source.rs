//! Source of hourly market snapshots.

use crate::domain::{HourStamp, HourlySnapshot};
use crate::error::Result;

/// Supplies the raw export for a given hour.
///
/// A missing hour is `Ok(None)`, not an error: multi-hour runs skip it and
/// continue with the hours that exist.
pub trait SnapshotSource {
    fn load(&self, hour: HourStamp) -> Result<Option<HourlySnapshot>>;
}
