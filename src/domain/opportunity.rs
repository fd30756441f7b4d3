//! Ranked single-hour output records.
//!
//! These are plain values rebuilt on every query. Prices, spreads and
//! percentiles are raw numbers; formatting belongs to the reporting layer.

use std::sync::Arc;

use serde::Serialize;

use super::currency::Currency;
use super::snapshot::VolumeMap;

/// A pair whose price range was unusually wide during the hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadOpportunity {
    pub from: Currency,
    pub to: Currency,
    /// `max_price / min_price - 1`.
    pub spread: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Higher of the base and divine volume percentiles.
    pub percentile: f64,
    pub base_volume: f64,
    pub divine_volume: f64,
    /// Hypothetical base-currency value of the spread on the configured
    /// notional, when `to` can be priced in the base currency.
    pub base_value: Option<f64>,
}

/// A three-leg cycle starting and ending in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriangularOpportunity {
    /// `[A, B, C]` for the cycle `A -> B -> C -> A`.
    pub path: [Currency; 3],
    /// Final amount of `A` minus one, starting from one unit.
    pub inefficiency: f64,
    /// Minimum prices used for each leg, in path order.
    pub steps: [f64; 3],
    /// Lowest liquidity percentile over the three legs.
    pub volume_percentile: f64,
    /// Largest base volume over the three legs.
    pub base_volume: f64,
    /// Largest divine volume over the three legs.
    pub divine_volume: f64,
    /// `notional * inefficiency` in base currency.
    pub base_value: f64,
}

impl TriangularOpportunity {
    /// Final amount of the starting currency after the cycle.
    #[must_use]
    pub fn final_amount(&self) -> f64 {
        self.steps.iter().product()
    }
}

/// A pair's traded volume during the hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketVolume {
    pub from: Currency,
    pub to: Currency,
    pub base_volume: f64,
    pub divine_volume: f64,
    #[serde(skip)]
    pub volume: Arc<VolumeMap>,
}

impl MarketVolume {
    /// Traded amount of `currency`, zero when absent.
    #[must_use]
    pub fn volume_of(&self, currency: &str) -> f64 {
        self.volume.get(currency).copied().unwrap_or(0.0)
    }

    /// The side of the pair that is not `currency`.
    #[must_use]
    pub fn counterpart(&self, currency: &str) -> Option<&Currency> {
        [&self.from, &self.to]
            .into_iter()
            .find(|c| c.as_str() != currency)
    }
}

/// Volume distribution of one currency across the hour's markets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyVolumeStats {
    pub mean: f64,
    pub median: f64,
    /// Markets with nonzero volume in this currency, largest first.
    pub top_markets: Vec<MarketVolume>,
}

/// Base and divine volume statistics for one hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolumeStats {
    pub base: Option<CurrencyVolumeStats>,
    pub divine: Option<CurrencyVolumeStats>,
}

impl VolumeStats {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.divine.is_none()
    }
}
