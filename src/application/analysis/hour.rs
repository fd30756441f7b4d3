//! Single-hour analysis: spread ranking, triangular cycles and volume stats.

use tracing::{info, warn};

use super::config::{MarketConfig, SpreadConfig, TriangularConfig};
use crate::domain::stats;
use crate::domain::{
    BaseCurrency, CurrencyVolumeStats, GraphBuilder, HourlySnapshot, MarketGraph, MarketVolume,
    PairId, PriceEdge, SpreadOpportunity, TriangularOpportunity, VolumeIndex, VolumeStats, DIVINE,
};

/// Analyzer over one hour's [`MarketGraph`].
///
/// The volume index, divine ratio and volume statistics are computed once on
/// construction; every query afterwards only reads.
#[derive(Debug, Clone)]
pub struct HourAnalyzer {
    graph: MarketGraph,
    volumes: VolumeIndex,
    base: BaseCurrency,
    notional: f64,
    direct_divine_ratio: Option<f64>,
    divine_to_base_ratio: f64,
    volume_stats: VolumeStats,
}

impl HourAnalyzer {
    /// Create an analyzer for an already built graph.
    #[must_use]
    pub fn new(graph: MarketGraph, base: BaseCurrency, market: &MarketConfig) -> Self {
        let volumes = VolumeIndex::from_graph(&graph, base);
        let direct_divine_ratio = graph.divine_to_base_ratio(base);
        let divine_to_base_ratio = match direct_divine_ratio {
            Some(ratio) => {
                info!(base = %base, ratio, "Using direct divine/base market ratio");
                ratio
            }
            None => {
                let ratio = market.fallback_divine_ratio(base);
                info!(base = %base, ratio, "Using fallback divine/base ratio");
                ratio
            }
        };
        let volume_stats = compute_volume_stats(&graph, base);

        Self {
            graph,
            volumes,
            base,
            notional: market.notional,
            direct_divine_ratio,
            divine_to_base_ratio,
            volume_stats,
        }
    }

    /// Build the graph for `snapshot` and analyze it.
    #[must_use]
    pub fn from_snapshot(
        snapshot: &HourlySnapshot,
        builder: &GraphBuilder,
        base: BaseCurrency,
        market: &MarketConfig,
    ) -> Self {
        Self::new(builder.build(snapshot), base, market)
    }

    #[must_use]
    pub const fn graph(&self) -> &MarketGraph {
        &self.graph
    }

    #[must_use]
    pub const fn volumes(&self) -> &VolumeIndex {
        &self.volumes
    }

    #[must_use]
    pub const fn base_currency(&self) -> BaseCurrency {
        self.base
    }

    /// Divine/base mid price if a direct market traded this hour.
    #[must_use]
    pub const fn direct_divine_ratio(&self) -> Option<f64> {
        self.direct_divine_ratio
    }

    /// Divine/base ratio used to express divine volume in base units.
    #[must_use]
    pub const fn divine_to_base_ratio(&self) -> f64 {
        self.divine_to_base_ratio
    }

    /// Each unordered pair with the edge oriented from its lexicographically
    /// smaller currency.
    pub fn canonical_edges(&self) -> impl Iterator<Item = (PairId, &PriceEdge)> {
        self.graph.unique_pairs().filter_map(|(a, b, _)| {
            let pair = PairId::new(a, b);
            let (first, second) = pair.currencies();
            let edge = self.graph.edge(first, second)?;
            Some((pair, edge))
        })
    }

    /// Pairs with the widest price ranges, widest first.
    #[must_use]
    pub fn spread_opportunities(&self, config: &SpreadConfig) -> Vec<SpreadOpportunity> {
        let mut opportunities = Vec::new();

        for (from, to, edge) in self.graph.unique_pairs() {
            let Some(spread) = edge.spread() else {
                continue;
            };
            if !spread.is_finite() {
                warn!(from = %from, to = %to, "Non-finite spread, skipping pair");
                continue;
            }
            if spread <= config.threshold {
                continue;
            }

            let base_volume = edge.volume_of(self.base.as_str());
            let divine_volume = edge.volume_of(DIVINE);
            if config.hide_zero_volume && base_volume == 0.0 && divine_volume == 0.0 {
                continue;
            }

            opportunities.push(SpreadOpportunity {
                from: from.clone(),
                to: to.clone(),
                spread,
                min_price: edge.min_price,
                max_price: edge.max_price,
                percentile: self.volumes.liquidity_percentile(edge),
                base_volume,
                divine_volume,
                base_value: self.spread_value(to.as_str(), spread),
            });
        }

        opportunities.sort_by(|a, b| b.spread.total_cmp(&a.spread));
        opportunities.truncate(config.top_n);
        opportunities
    }

    fn spread_value(&self, quote: &str, spread: f64) -> Option<f64> {
        if quote == self.base.as_str() {
            return Some(self.notional * spread);
        }
        self.graph
            .edge(quote, self.base.as_str())
            .map(|to_base| self.notional * to_base.min_price * spread)
    }

    /// Base-currency cycles `base -> B -> C -> base` priced at minimum
    /// prices, largest inefficiency first.
    #[must_use]
    pub fn triangular_opportunities(&self, config: &TriangularConfig) -> Vec<TriangularOpportunity> {
        let base = self.base.as_str();
        if !self.graph.contains(base) {
            return Vec::new();
        }

        let currencies = self.graph.currencies();
        let mut opportunities = Vec::new();

        for b in currencies.iter().filter(|c| c.as_str() != base) {
            for c in currencies.iter().filter(|c| c.as_str() != base && *c != b) {
                let (Some(ab), Some(bc), Some(ca)) = (
                    self.graph.edge(base, b.as_str()),
                    self.graph.edge(b.as_str(), c.as_str()),
                    self.graph.edge(c.as_str(), base),
                ) else {
                    continue;
                };
                let legs = [ab, bc, ca];
                let steps = [ab.min_price, bc.min_price, ca.min_price];

                let final_amount = steps.iter().fold(1.0, |amount, price| amount * price);
                let inefficiency = final_amount - 1.0;
                if !inefficiency.is_finite() {
                    warn!(path = %format!("{base}->{b}->{c}"), "Non-finite cycle result, skipping");
                    continue;
                }
                if inefficiency <= 0.0 {
                    continue;
                }

                let has_volume = |leg: &PriceEdge| {
                    leg.volume_of(base) > 0.0 || leg.volume_of(DIVINE) > 0.0
                };
                if config.hide_zero_volume && !legs.iter().all(|leg| has_volume(leg)) {
                    continue;
                }

                let lowest_percentile = legs
                    .iter()
                    .map(|leg| self.volumes.liquidity_percentile(leg))
                    .fold(f64::INFINITY, f64::min);
                if lowest_percentile < config.min_percentile {
                    continue;
                }

                let base_volume = legs.iter().map(|leg| leg.volume_of(base)).fold(0.0, f64::max);
                let divine_volume = legs.iter().map(|leg| leg.volume_of(DIVINE)).fold(0.0, f64::max);

                opportunities.push(TriangularOpportunity {
                    path: [self.base.currency(), b.clone(), c.clone()],
                    inefficiency,
                    steps,
                    volume_percentile: lowest_percentile,
                    base_volume,
                    divine_volume,
                    base_value: self.notional * inefficiency,
                });
            }
        }

        opportunities.sort_by(|a, b| b.inefficiency.total_cmp(&a.inefficiency));
        opportunities.truncate(config.top_n);
        opportunities
    }

    /// Base and divine volume statistics with at most `top_n` markets each.
    #[must_use]
    pub fn volume_stats(&self, top_n: usize) -> VolumeStats {
        let mut stats = self.volume_stats.clone();
        for currency in [&mut stats.base, &mut stats.divine].into_iter().flatten() {
            currency.top_markets.truncate(top_n);
        }
        stats
    }
}

fn compute_volume_stats(graph: &MarketGraph, base: BaseCurrency) -> VolumeStats {
    let markets: Vec<MarketVolume> = graph
        .unique_pairs()
        .filter_map(|(from, to, edge)| {
            let base_volume = edge.volume_of(base.as_str());
            let divine_volume = edge.volume_of(DIVINE);
            (base_volume > 0.0 || divine_volume > 0.0).then(|| MarketVolume {
                from: from.clone(),
                to: to.clone(),
                base_volume,
                divine_volume,
                volume: edge.volume.clone(),
            })
        })
        .collect();

    VolumeStats {
        base: currency_stats(&markets, |m| m.base_volume),
        divine: currency_stats(&markets, |m| m.divine_volume),
    }
}

fn currency_stats(
    markets: &[MarketVolume],
    volume: impl Fn(&MarketVolume) -> f64,
) -> Option<CurrencyVolumeStats> {
    let mut top_markets: Vec<MarketVolume> = markets
        .iter()
        .filter(|m| volume(m) > 0.0)
        .cloned()
        .collect();
    if top_markets.is_empty() {
        return None;
    }

    top_markets.sort_by(|a, b| volume(b).total_cmp(&volume(a)));
    let volumes: Vec<f64> = top_markets.iter().map(&volume).collect();

    Some(CurrencyVolumeStats {
        mean: stats::mean(&volumes),
        median: stats::median(&volumes),
        top_markets,
    })
}
