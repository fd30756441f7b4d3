//! Currency identifiers and the realm-dependent base currency.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Code of the premium currency used as the second volume denomination.
pub const DIVINE: &str = "divine";

/// Currency code as it appears in exchange pair ids (`"chaos"`, `"divine"`).
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a new Currency from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The premium currency.
    #[must_use]
    pub fn divine() -> Self {
        Self::new(DIVINE)
    }

    /// Get the currency code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for Currency {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for Currency {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Reference currency that liquidity filters are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseCurrency {
    Chaos,
    Exalted,
}

impl BaseCurrency {
    /// Currency code used in pair ids and volume maps.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chaos => "chaos",
            Self::Exalted => "exalted",
        }
    }

    /// Capitalised name for display.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Chaos => "Chaos",
            Self::Exalted => "Exalted",
        }
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        Currency::new(self.as_str())
    }
}

impl fmt::Display for BaseCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Realm an hourly export was taken from.
///
/// The second game version trades against exalted orbs; every other realm
/// uses chaos as the base currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    #[default]
    Pc,
    Xbox,
    Sony,
    Poe2,
}

impl Realm {
    #[must_use]
    pub const fn base_currency(&self) -> BaseCurrency {
        match self {
            Self::Poe2 => BaseCurrency::Exalted,
            Self::Pc | Self::Xbox | Self::Sony => BaseCurrency::Chaos,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pc => "pc",
            Self::Xbox => "xbox",
            Self::Sony => "sony",
            Self::Poe2 => "poe2",
        }
    }

    /// Path segment used by exports; the default realm has none.
    #[must_use]
    pub const fn export_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Pc => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn currency_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(Currency::from("chaos"), 1);
        assert_eq!(map.get("chaos"), Some(&1));
        assert_eq!(map.get("divine"), None);
    }

    #[test]
    fn currency_display() {
        assert_eq!(format!("{}", Currency::divine()), "divine");
    }

    #[test]
    fn realm_selects_base_currency() {
        assert_eq!(Realm::Pc.base_currency(), BaseCurrency::Chaos);
        assert_eq!(Realm::Xbox.base_currency(), BaseCurrency::Chaos);
        assert_eq!(Realm::Poe2.base_currency(), BaseCurrency::Exalted);
    }

    #[test]
    fn realm_export_suffix() {
        assert_eq!(Realm::Pc.export_suffix(), None);
        assert_eq!(Realm::Poe2.export_suffix(), Some("poe2"));
    }
}
