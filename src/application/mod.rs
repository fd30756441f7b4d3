//! Application services (use cases).
//!
//! The analyzers here are pure; [`AnalysisService`] wires them to a
//! snapshot source and to notifiers.

pub mod analysis;
pub mod service;

pub use analysis::{AnalysisConfig, HourAnalyzer, TrendAggregator};
pub use service::{AnalysisService, HourReport, HourWindow, LoadedHour, MarketScope, TrendReport};
