//! Hourly and multi-hour market analysis.

pub mod config;
pub mod hour;
pub mod trend;

pub use config::{
    AnalysisConfig, ComparisonConfig, MarketConfig, PersistenceConfig, SpreadConfig,
    TrendingConfig, TriangularConfig, VolumeConfig,
};
pub use hour::HourAnalyzer;
pub use trend::TrendAggregator;
