use super::entities::{Coin, Symbol};
use crate::domain::logging::LogComponent;
use crate::log_info;

/// Every coin known to the session, fetched once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinCatalog {
    coins: Vec<Coin>,
}

impl CoinCatalog {
    pub fn new(coins: Vec<Coin>) -> Self {
        Self { coins }
    }

    /// Swap the whole catalog; coins are never patched in place.
    pub fn replace(&mut self, coins: Vec<Coin>) {
        log_info!(LogComponent::Domain("CoinCatalog"), "Catalog replaced: {} -> {} coins", self.coins.len(), coins.len());
        self.coins = coins;
    }

    pub fn clear(&mut self) {
        self.coins.clear();
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// First coin carrying `symbol`.
    pub fn lookup(&self, symbol: &Symbol) -> Option<&Coin> {
        self.coins.iter().find(|coin| &coin.symbol == symbol)
    }

    /// Case-insensitive exact symbol match. An empty result means "no match";
    /// how that is displayed is the caller's policy.
    pub fn filter_by_symbol(&self, query: &str) -> Vec<&Coin> {
        self.coins.iter().filter(|coin| coin.symbol.matches(query)).collect()
    }

    /// Coins whose symbol is in `symbols`, in catalog order.
    pub fn coins_for(&self, symbols: &[Symbol]) -> Vec<Coin> {
        self.coins.iter().filter(|coin| symbols.contains(&coin.symbol)).cloned().collect()
    }

    /// Legend name for a tracked symbol, falling back to the symbol itself.
    pub fn display_name(&self, symbol: &Symbol) -> String {
        self.lookup(symbol)
            .map(|coin| coin.name.clone())
            .unwrap_or_else(|| symbol.value().to_string())
    }
}
