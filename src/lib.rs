//! cxscan - currency exchange market scanner.
//!
//! Reads hourly exports of an in-game currency exchange and looks for
//! mispriced markets.
//!
//! # Architecture
//!
//! - **`domain`** - records, the per-hour price graph, volume percentiles,
//!   statistics helpers and the ranked output types
//! - **`application`** - `HourAnalyzer` (spreads, triangular cycles, volume
//!   statistics), `TrendAggregator` (persistence, trends, comparison against
//!   history) and the `AnalysisService` tying them to a snapshot source
//! - **`port`** - `SnapshotSource` and `Notifier` traits
//! - **`adapter`** - export directory loader, log notifier and the CLI
//! - **`infrastructure`** - TOML configuration and logging setup
//!
//! # Example
//!
//! ```no_run
//! use cxscan::application::analysis::{HourAnalyzer, MarketConfig, SpreadConfig};
//! use cxscan::domain::{BaseCurrency, GraphBuilder, HourlySnapshot};
//!
//! let snapshot = HourlySnapshot::from_json(r#"{"markets": []}"#).unwrap();
//! let analyzer = HourAnalyzer::from_snapshot(
//!     &snapshot,
//!     &GraphBuilder::new("Standard"),
//!     BaseCurrency::Chaos,
//!     &MarketConfig::default(),
//! );
//! let spreads = analyzer.spread_opportunities(&SpreadConfig::default());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
