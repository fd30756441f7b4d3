//! Notification adapters.
//!
//! Implements the `port::Notifier` trait on top of `tracing`.

use tracing::{info, warn};

use crate::port::{Event, Notifier};

/// Writes each event as a structured log line.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::HourAnalyzed(e) => {
                info!(
                    hour = ?e.hour.map(|h| h.to_string()),
                    records = e.records,
                    currencies = e.currencies,
                    pairs = e.pairs,
                    skipped = e.skipped.total(),
                    divine_ratio = e.divine_to_base_ratio,
                    "Hour analyzed"
                );
            }
            Event::HourMissing { hour } => {
                warn!(hour = %hour, "Hour missing from window");
            }
            Event::SpreadDetected(e) => {
                info!(
                    market = %e.market,
                    spread = e.spread,
                    percentile = e.percentile,
                    base_value = ?e.base_value,
                    "Spread detected"
                );
            }
            Event::CycleDetected(e) => {
                info!(
                    path = %e.path,
                    inefficiency = e.inefficiency,
                    percentile = e.volume_percentile,
                    base_value = e.base_value,
                    "Cycle detected"
                );
            }
            Event::TrendAnalyzed(e) => {
                info!(
                    hours = e.hours_analyzed,
                    missing = e.hours_missing,
                    persistent = e.persistent,
                    trending = e.trending,
                    above_average = e.above_average,
                    top_persistent = ?e.top_persistent,
                    top_trending = ?e.top_trending,
                    "Trend analyzed"
                );
            }
        }
    }
}
