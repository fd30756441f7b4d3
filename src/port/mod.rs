//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! - [`SnapshotSource`] - where hourly exports come from
//! - [`Notifier`] - where analysis events go

pub mod outbound;

pub use outbound::notifier::{
    CycleEvent, Event, HourEvent, Notifier, NotifierRegistry, NullNotifier, SpreadEvent,
    TrendEvent,
};
pub use outbound::source::SnapshotSource;
