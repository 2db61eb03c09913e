pub use super::value_objects::{Price, QuoteCurrency, Symbol, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Price snapshot taken when the catalog was fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentPrice {
    pub usd: Option<Price>,
    pub eur: Option<Price>,
    pub ils: Option<Price>,
}

impl CurrentPrice {
    pub fn get(&self, currency: QuoteCurrency) -> Option<Price> {
        match currency {
            QuoteCurrency::Usd => self.usd,
            QuoteCurrency::Eur => self.eur,
            QuoteCurrency::Ils => self.ils,
        }
    }
}

/// Domain entity - Coin. Immutable once fetched; the catalog replaces coins wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    /// Normalised match key
    pub symbol: Symbol,
    /// Symbol exactly as the upstream listed it, for display
    #[serde(default)]
    pub ticker: String,
    pub name: String,
    pub thumb: String,
    pub current_price: CurrentPrice,
}

impl Coin {
    pub fn new(id: &str, symbol: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            symbol: Symbol::from(symbol),
            ticker: symbol.to_string(),
            name: name.to_string(),
            thumb: String::new(),
            current_price: CurrentPrice::default(),
        }
    }

    pub fn with_thumb(mut self, thumb: &str) -> Self {
        self.thumb = thumb.to_string();
        self
    }

    pub fn with_price(mut self, currency: QuoteCurrency, price: f64) -> Self {
        let slot = match currency {
            QuoteCurrency::Usd => &mut self.current_price.usd,
            QuoteCurrency::Eur => &mut self.current_price.eur,
            QuoteCurrency::Ils => &mut self.current_price.ils,
        };
        *slot = Some(Price::new(price));
        self
    }

    /// `"50000 $"`, or `"n/a"` when the snapshot lacks the currency.
    pub fn price_label(&self, currency: QuoteCurrency) -> String {
        match self.current_price.get(currency) {
            Some(price) => format!("{} {}", price.value(), currency.sign()),
            None => "n/a".to_string(),
        }
    }
}

/// One recorded point of a live series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceObservation {
    pub timestamp: Timestamp,
    pub price: Price,
}

impl PriceObservation {
    pub fn new(timestamp: Timestamp, price: Price) -> Self {
        Self { timestamp, price }
    }
}

/// Prices delivered by one tick, keyed by symbol
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceBatch {
    prices: BTreeMap<Symbol, Price>,
}

impl PriceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol, price: Price) {
        self.prices.insert(symbol, price);
    }

    pub fn get(&self, symbol: &Symbol) -> Option<Price> {
        self.prices.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Price)> {
        self.prices.iter()
    }

    /// Drop every symbol the predicate rejects, returning the dropped symbols.
    pub fn retain_symbols(&mut self, mut keep: impl FnMut(&Symbol) -> bool) -> Vec<Symbol> {
        let dropped: Vec<Symbol> = self.prices.keys().filter(|s| !keep(s)).cloned().collect();
        for symbol in &dropped {
            self.prices.remove(symbol);
        }
        dropped
    }
}

impl<S: Into<Symbol>> FromIterator<(S, f64)> for PriceBatch {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(s, p)| (s.into(), Price::new(p))).collect(),
        }
    }
}
