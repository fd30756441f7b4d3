//! Canonical identifiers for unordered currency pairs.

use std::fmt;

use serde::Serialize;

use super::currency::Currency;

/// Separator between the two currencies of an exchange market id.
pub const PAIR_SEPARATOR: char = '|';

/// Identifier of an unordered currency pair.
///
/// Always stored as `"min|max"` with the currencies sorted lexicographically,
/// so `chaos|divine` and `divine|chaos` name the same market across hours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    /// Build the canonical id for two currencies in either order.
    pub fn new(a: &Currency, b: &Currency) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{first}{PAIR_SEPARATOR}{second}"))
    }

    /// Parse a `"a|b"` id and canonicalise it.
    pub fn parse(id: &str) -> Option<Self> {
        split_market_id(id).map(|(a, b)| Self::new(&a, &b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two currencies, lexicographically ordered.
    pub fn currencies(&self) -> (&str, &str) {
        self.0
            .split_once(PAIR_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Split an exchange market id into exactly two non-empty currency codes.
pub fn split_market_id(id: &str) -> Option<(Currency, Currency)> {
    let mut parts = id.split(PAIR_SEPARATOR);
    let a = parts.next()?;
    let b = parts.next()?;
    if parts.next().is_some() || a.is_empty() || b.is_empty() {
        return None;
    }
    Some((Currency::from(a), Currency::from(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_id_is_order_independent() {
        let chaos = Currency::from("chaos");
        let divine = Currency::from("divine");
        assert_eq!(PairId::new(&chaos, &divine), PairId::new(&divine, &chaos));
        assert_eq!(PairId::new(&divine, &chaos).as_str(), "chaos|divine");
    }

    #[test]
    fn pair_id_parse_canonicalises() {
        let id = PairId::parse("divine|chaos").unwrap();
        assert_eq!(id.as_str(), "chaos|divine");
        assert_eq!(id.currencies(), ("chaos", "divine"));
    }

    #[test]
    fn split_rejects_malformed_ids() {
        assert!(split_market_id("").is_none());
        assert!(split_market_id("chaos").is_none());
        assert!(split_market_id("chaos|").is_none());
        assert!(split_market_id("|divine").is_none());
        assert!(split_market_id("a|b|c").is_none());
        assert!(split_market_id("chaos|divine").is_some());
    }
}
