//! Hour-aligned timestamps for hourly exports.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

const SECONDS_PER_HOUR: i64 = 3600;

/// A unix timestamp floored to the start of its hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HourStamp(i64);

impl HourStamp {
    /// Floor an arbitrary unix timestamp to its hour.
    #[must_use]
    pub const fn floor(timestamp: i64) -> Self {
        Self(timestamp.div_euclid(SECONDS_PER_HOUR) * SECONDS_PER_HOUR)
    }

    /// The hour containing the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self::floor(Utc::now().timestamp())
    }

    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.0
    }

    /// The hour `hours` whole hours earlier.
    #[must_use]
    pub const fn hours_before(&self, hours: u32) -> Self {
        Self(self.0 - hours as i64 * SECONDS_PER_HOUR)
    }

    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }
}

impl fmt::Display for HourStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:00 UTC")),
            None => write!(f, "{}", self.0),
        }
    }
}
