//! Per-hour volume index used for liquidity percentiles.

use super::currency::{BaseCurrency, DIVINE};
use super::graph::{MarketGraph, PriceEdge};

/// Percentile (0-100) of `volume` within an ascending list.
///
/// The rank is the insertion point of `volume` (entries strictly below it)
/// divided by the list length. Non-positive volumes and empty lists rank 0.
#[must_use]
pub fn volume_percentile(volume: f64, sorted: &[f64]) -> f64 {
    if sorted.is_empty() || volume <= 0.0 {
        return 0.0;
    }
    let rank = sorted.partition_point(|v| *v < volume);
    rank as f64 / sorted.len() as f64 * 100.0
}

/// Sorted nonzero base and divine volumes over the hour's unique pairs.
#[derive(Debug, Clone)]
pub struct VolumeIndex {
    base: BaseCurrency,
    base_volumes: Vec<f64>,
    divine_volumes: Vec<f64>,
}

impl VolumeIndex {
    #[must_use]
    pub fn from_graph(graph: &MarketGraph, base: BaseCurrency) -> Self {
        let mut base_volumes = Vec::new();
        let mut divine_volumes = Vec::new();

        for (_, _, edge) in graph.unique_pairs() {
            let base_volume = edge.volume_of(base.as_str());
            let divine_volume = edge.volume_of(DIVINE);
            if base_volume > 0.0 {
                base_volumes.push(base_volume);
            }
            if divine_volume > 0.0 {
                divine_volumes.push(divine_volume);
            }
        }

        base_volumes.sort_by(f64::total_cmp);
        divine_volumes.sort_by(f64::total_cmp);

        Self {
            base,
            base_volumes,
            divine_volumes,
        }
    }

    #[must_use]
    pub fn base_volumes(&self) -> &[f64] {
        &self.base_volumes
    }

    #[must_use]
    pub fn divine_volumes(&self) -> &[f64] {
        &self.divine_volumes
    }

    #[must_use]
    pub fn base_percentile(&self, volume: f64) -> f64 {
        volume_percentile(volume, &self.base_volumes)
    }

    #[must_use]
    pub fn divine_percentile(&self, volume: f64) -> f64 {
        volume_percentile(volume, &self.divine_volumes)
    }

    /// The higher of the edge's base and divine volume percentiles.
    #[must_use]
    pub fn liquidity_percentile(&self, edge: &PriceEdge) -> f64 {
        let base = self.base_percentile(edge.volume_of(self.base.as_str()));
        let divine = self.divine_percentile(edge.volume_of(DIVINE));
        base.max(divine)
    }
}
