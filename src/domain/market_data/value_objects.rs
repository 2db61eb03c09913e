use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::errors::DashboardError;

/// Value Object - quote price
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - milliseconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Constructor, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }
}

/// Value Object - ticker symbol, always stored upper-case
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    /// Validating constructor used at the wire boundary.
    pub fn new(symbol: &str) -> Result<Self, DashboardError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(DashboardError::Parse("symbol cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against raw user input.
    pub fn matches(&self, query: &str) -> bool {
        self.0 == query.trim().to_uppercase()
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}

/// Quote currencies carried by the catalog snapshot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum QuoteCurrency {
    #[default]
    #[strum(serialize = "USD")]
    #[serde(rename = "USD")]
    Usd,

    #[strum(serialize = "EUR")]
    #[serde(rename = "EUR")]
    Eur,

    #[strum(serialize = "ILS")]
    #[serde(rename = "ILS")]
    Ils,
}

impl QuoteCurrency {
    pub fn sign(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Ils => "₪",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn symbol_is_normalised_to_upper_case() {
        assert_eq!(Symbol::from("btc").value(), "BTC");
        assert_eq!(Symbol::new(" eth ").unwrap().value(), "ETH");
    }

    #[test]
    fn empty_symbol_is_rejected() {
        assert!(Symbol::new("   ").is_err());
    }

    #[test]
    fn symbol_matches_ignoring_case() {
        let sym = Symbol::from("BTC");
        assert!(sym.matches("btc"));
        assert!(sym.matches("Btc "));
        assert!(!sym.matches("bt"));
    }

    #[test]
    fn non_ascii_symbol_matches_its_own_spelling() {
        let sym = Symbol::from("ä");
        assert_eq!(sym.value(), "Ä");
        assert!(sym.matches("ä"));
        assert!(sym.matches("Ä"));
    }

    #[test]
    fn quote_currency_codes_round_trip() {
        for currency in QuoteCurrency::iter() {
            assert_eq!(QuoteCurrency::from_str(currency.as_ref()).unwrap(), currency);
        }
        assert_eq!(QuoteCurrency::default().to_string(), "USD");
        assert_eq!(QuoteCurrency::Ils.sign(), "₪");
    }
}
