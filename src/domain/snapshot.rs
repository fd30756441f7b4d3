//! Raw hourly market payloads as supplied by the exchange export.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Traded amount per currency code.
pub type VolumeMap = HashMap<String, f64>;

/// One traded pair during one hour, exactly as exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMarketRecord {
    #[serde(default)]
    pub league: String,
    /// Pair identifier of the form `"A|B"`.
    #[serde(default)]
    pub market_id: String,
    /// Lowest `A:B` exchange ratio observed during the hour.
    #[serde(default)]
    pub lowest_ratio: HashMap<String, f64>,
    /// Highest `A:B` exchange ratio observed during the hour.
    #[serde(default)]
    pub highest_ratio: HashMap<String, f64>,
    #[serde(default)]
    pub volume_traded: VolumeMap,
}

impl RawMarketRecord {
    pub fn new(league: impl Into<String>, market_id: impl Into<String>) -> Self {
        Self {
            league: league.into(),
            market_id: market_id.into(),
            ..Self::default()
        }
    }

    /// Set both sides of the lowest observed ratio.
    #[must_use]
    pub fn with_lowest(mut self, a: (&str, f64), b: (&str, f64)) -> Self {
        self.lowest_ratio.insert(a.0.to_string(), a.1);
        self.lowest_ratio.insert(b.0.to_string(), b.1);
        self
    }

    /// Set both sides of the highest observed ratio.
    #[must_use]
    pub fn with_highest(mut self, a: (&str, f64), b: (&str, f64)) -> Self {
        self.highest_ratio.insert(a.0.to_string(), a.1);
        self.highest_ratio.insert(b.0.to_string(), b.1);
        self
    }

    #[must_use]
    pub fn with_volume(mut self, currency: &str, amount: f64) -> Self {
        self.volume_traded.insert(currency.to_string(), amount);
        self
    }
}

/// One hour of exchange data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySnapshot {
    #[serde(default)]
    pub markets: Vec<RawMarketRecord>,
}

impl HourlySnapshot {
    pub fn new(markets: Vec<RawMarketRecord>) -> Self {
        Self { markets }
    }

    /// Decode an export payload.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Read and decode an export file.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| SourceError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_export_payload() {
        let json = r#"{
            "next_change_id": 1700000000,
            "markets": [{
                "league": "Standard",
                "market_id": "chaos|divine",
                "volume_traded": {"chaos": 12000, "divine": 48},
                "lowest_stock": {"chaos": 100, "divine": 1},
                "lowest_ratio": {"chaos": 250, "divine": 1},
                "highest_ratio": {"chaos": 260, "divine": 1}
            }]
        }"#;

        let snapshot = HourlySnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.len(), 1);
        let market = &snapshot.markets[0];
        assert_eq!(market.market_id, "chaos|divine");
        assert_eq!(market.lowest_ratio["chaos"], 250.0);
        assert_eq!(market.volume_traded["divine"], 48.0);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let snapshot = HourlySnapshot::from_json(r#"{"markets": [{}]}"#).unwrap();
        let market = &snapshot.markets[0];
        assert!(market.market_id.is_empty());
        assert!(market.lowest_ratio.is_empty());
        assert!(HourlySnapshot::from_json("{}").unwrap().is_empty());
    }
}
