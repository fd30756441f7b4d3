//! Notifier port for analysis events.
//!
//! Analysis runs publish what they found as [`Event`]s; adapters decide
//! whether to log them, print them or drop them.

use crate::domain::{HourStamp, SkipCounts, SpreadOpportunity, TriangularOpportunity};

/// Events emitted while analysing a league.
#[derive(Debug, Clone)]
pub enum Event {
    /// An hour's graph was built and analysed.
    HourAnalyzed(HourEvent),
    /// A requested hour had no export and was left out of the window.
    HourMissing {
        hour: HourStamp,
    },
    /// A spread passed the ranking thresholds.
    SpreadDetected(SpreadEvent),
    /// A profitable base-currency cycle was found.
    CycleDetected(CycleEvent),
    /// Multi-hour analysis finished.
    TrendAnalyzed(TrendEvent),
}

/// Summary of one analysed hour.
#[derive(Debug, Clone)]
pub struct HourEvent {
    /// `None` when the snapshot did not come from a dated export.
    pub hour: Option<HourStamp>,
    pub records: usize,
    pub currencies: usize,
    pub pairs: usize,
    pub skipped: SkipCounts,
    pub divine_to_base_ratio: f64,
}

/// A ranked spread.
#[derive(Debug, Clone)]
pub struct SpreadEvent {
    pub market: String,
    pub spread: f64,
    pub percentile: f64,
    pub base_value: Option<f64>,
}

impl From<&SpreadOpportunity> for SpreadEvent {
    fn from(opp: &SpreadOpportunity) -> Self {
        Self {
            market: format!("{}->{}", opp.from, opp.to),
            spread: opp.spread,
            percentile: opp.percentile,
            base_value: opp.base_value,
        }
    }
}

/// A ranked triangular cycle.
#[derive(Debug, Clone)]
pub struct CycleEvent {
    /// `A->B->C->A`.
    pub path: String,
    pub inefficiency: f64,
    pub volume_percentile: f64,
    pub base_value: f64,
}

impl From<&TriangularOpportunity> for CycleEvent {
    fn from(opp: &TriangularOpportunity) -> Self {
        let [a, b, c] = &opp.path;
        Self {
            path: format!("{a}->{b}->{c}->{a}"),
            inefficiency: opp.inefficiency,
            volume_percentile: opp.volume_percentile,
            base_value: opp.base_value,
        }
    }
}

/// Outcome of a multi-hour run.
#[derive(Debug, Clone)]
pub struct TrendEvent {
    pub hours_analyzed: usize,
    pub hours_missing: usize,
    pub persistent: usize,
    pub trending: usize,
    pub above_average: usize,
    /// Highest-scoring persistent pair, if any.
    pub top_persistent: Option<String>,
    /// Steepest widening pair, if any.
    pub top_trending: Option<String>,
}

/// Receiver of analysis events.
///
/// Implementations must be thread-safe and should return quickly.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: Event);
}

/// Broadcasts events to every registered notifier.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops every event.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}
