//! Directed price/volume graph for one hour of trading.
//!
//! Every accepted market record yields two edges: `A -> B` with the prices
//! of one `A` in `B`, and the reciprocal `B -> A`. Both directions share the
//! same volume map.
//!
//! The hour's lowest observed ratio gives the *maximum* price of `A` in `B`
//! and the highest observed ratio gives the *minimum* price:
//!
//! ```text
//! max_price(A->B) = lowest_ratio[B] / lowest_ratio[A]
//! min_price(A->B) = highest_ratio[B] / highest_ratio[A]
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::currency::{BaseCurrency, Currency, DIVINE};
use super::pair::split_market_id;
use super::snapshot::{HourlySnapshot, RawMarketRecord, VolumeMap};

/// Prices of one unit of the source currency in the target currency.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEdge {
    pub min_price: f64,
    pub max_price: f64,
    pub volume: Arc<VolumeMap>,
}

impl PriceEdge {
    pub fn new(min_price: f64, max_price: f64, volume: Arc<VolumeMap>) -> Self {
        Self {
            min_price,
            max_price,
            volume,
        }
    }

    /// The same market seen from the other currency.
    #[must_use]
    pub fn reciprocal(&self) -> Self {
        Self {
            min_price: 1.0 / self.max_price,
            max_price: 1.0 / self.min_price,
            volume: Arc::clone(&self.volume),
        }
    }

    /// `max / min - 1`, or `None` when the minimum price is not positive.
    #[must_use]
    pub fn spread(&self) -> Option<f64> {
        if self.min_price > 0.0 {
            Some(self.max_price / self.min_price - 1.0)
        } else {
            None
        }
    }

    /// Traded amount of `currency`, zero when absent.
    #[must_use]
    pub fn volume_of(&self, currency: &str) -> f64 {
        self.volume.get(currency).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn mid_price(&self) -> f64 {
        (self.min_price + self.max_price) / 2.0
    }
}

/// Why a raw record was left out of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    WrongLeague,
    InvalidId,
    MissingRatios,
    ZeroRatio,
}

/// Per-reason counters of skipped records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SkipCounts {
    pub wrong_league: usize,
    pub invalid_id: usize,
    pub missing_ratios: usize,
    pub zero_ratio: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::WrongLeague => self.wrong_league += 1,
            SkipReason::InvalidId => self.invalid_id += 1,
            SkipReason::MissingRatios => self.missing_ratios += 1,
            SkipReason::ZeroRatio => self.zero_ratio += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.wrong_league + self.invalid_id + self.missing_ratios + self.zero_ratio
    }
}

/// Adjacency map `currency -> currency -> edge`.
///
/// Currencies and unordered pairs are remembered in first-seen order so
/// iteration is deterministic and follows the export's record order.
#[derive(Debug, Clone, Default)]
pub struct MarketGraph {
    edges: HashMap<Currency, HashMap<Currency, PriceEdge>>,
    currencies: Vec<Currency>,
    pairs: Vec<(Currency, Currency)>,
    skipped: SkipCounts,
}

impl MarketGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `forward` as `from -> to` and its reciprocal as `to -> from`.
    ///
    /// A pair seen again replaces the previous edges.
    pub fn insert(&mut self, from: Currency, to: Currency, forward: PriceEdge) {
        if self.edge(from.as_str(), to.as_str()).is_none() {
            self.pairs.push((from.clone(), to.clone()));
        }
        for currency in [&from, &to] {
            if !self.edges.contains_key(currency.as_str()) {
                self.currencies.push(currency.clone());
                self.edges.insert(currency.clone(), HashMap::new());
            }
        }

        let reverse = forward.reciprocal();
        if let Some(targets) = self.edges.get_mut(from.as_str()) {
            targets.insert(to.clone(), forward);
        }
        if let Some(targets) = self.edges.get_mut(to.as_str()) {
            targets.insert(from, reverse);
        }
    }

    #[must_use]
    pub fn edge(&self, from: &str, to: &str) -> Option<&PriceEdge> {
        self.edges.get(from)?.get(to)
    }

    #[must_use]
    pub fn contains(&self, currency: &str) -> bool {
        self.edges.contains_key(currency)
    }

    /// Currencies in first-seen order.
    #[must_use]
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Each unordered pair once, from the orientation it was first seen in.
    pub fn unique_pairs(&self) -> impl Iterator<Item = (&Currency, &Currency, &PriceEdge)> {
        self.pairs
            .iter()
            .filter_map(|(a, b)| self.edge(a.as_str(), b.as_str()).map(|edge| (a, b, edge)))
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub const fn skipped(&self) -> SkipCounts {
        self.skipped
    }

    /// Units of base currency per divine from a direct market, if one traded.
    #[must_use]
    pub fn divine_to_base_ratio(&self, base: BaseCurrency) -> Option<f64> {
        self.edge(DIVINE, base.as_str()).map(PriceEdge::mid_price)
    }
}

/// Filters raw records for one league and turns them into a [`MarketGraph`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    league: String,
}

impl GraphBuilder {
    pub fn new(league: impl Into<String>) -> Self {
        Self {
            league: league.into(),
        }
    }

    #[must_use]
    pub fn league(&self) -> &str {
        &self.league
    }

    #[must_use]
    pub fn build(&self, snapshot: &HourlySnapshot) -> MarketGraph {
        let mut graph = MarketGraph::new();

        for record in &snapshot.markets {
            match self.edge_for(record) {
                Ok((from, to, edge)) => graph.insert(from, to, edge),
                Err(reason) => {
                    debug!(market_id = %record.market_id, ?reason, "Skipping market record");
                    graph.skipped.record(reason);
                }
            }
        }

        let skipped = graph.skipped;
        debug!(
            league = %self.league,
            currencies = graph.currencies.len(),
            pairs = graph.pairs.len(),
            wrong_league = skipped.wrong_league,
            invalid_id = skipped.invalid_id,
            missing_ratios = skipped.missing_ratios,
            zero_ratio = skipped.zero_ratio,
            "Market graph built"
        );

        graph
    }

    fn edge_for(
        &self,
        record: &RawMarketRecord,
    ) -> Result<(Currency, Currency, PriceEdge), SkipReason> {
        if record.league != self.league {
            return Err(SkipReason::WrongLeague);
        }

        let (a, b) = split_market_id(&record.market_id).ok_or(SkipReason::InvalidId)?;

        let ratio = |ratios: &HashMap<String, f64>, currency: &Currency| {
            ratios
                .get(currency.as_str())
                .copied()
                .ok_or(SkipReason::MissingRatios)
        };
        let low_a = ratio(&record.lowest_ratio, &a)?;
        let low_b = ratio(&record.lowest_ratio, &b)?;
        let high_a = ratio(&record.highest_ratio, &a)?;
        let high_b = ratio(&record.highest_ratio, &b)?;

        if [low_a, low_b, high_a, high_b].contains(&0.0) {
            return Err(SkipReason::ZeroRatio);
        }

        let max_price = low_b / low_a;
        let min_price = high_b / high_a;
        let volume = Arc::new(record.volume_traded.clone());

        Ok((a, b, PriceEdge::new(min_price, max_price, volume)))
    }
}
