//! Exchange-agnostic domain types and pure market algorithms.

pub mod currency;
pub mod graph;
pub mod hour;
pub mod opportunity;
pub mod pair;
pub mod snapshot;
pub mod stats;
pub mod trend;
pub mod volume;

pub use currency::{BaseCurrency, Currency, Realm, DIVINE};
pub use graph::{GraphBuilder, MarketGraph, PriceEdge, SkipCounts, SkipReason};
pub use hour::HourStamp;
pub use opportunity::{
    CurrencyVolumeStats, MarketVolume, SpreadOpportunity, TriangularOpportunity, VolumeStats,
};
pub use pair::PairId;
pub use snapshot::{HourlySnapshot, RawMarketRecord, VolumeMap};
pub use trend::{
    HistoricalComparison, MarketHistory, MarketSummary, PersistentMarket, SpreadPoint,
    TrendingMarket,
};
pub use volume::{volume_percentile, VolumeIndex};
