use super::entities::{Coin, Symbol};

/// One view's symbol filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FilterSlot {
    /// Never submitted, or reset by a view switch.
    #[default]
    Unset,
    /// Submitted, but nothing in the catalog matched.
    NoMatch,
    /// Non-empty, de-duplicated, in catalog order.
    Matched(Vec<Symbol>),
}

impl FilterSlot {
    pub fn from_matches(coins: &[&Coin]) -> Self {
        let mut symbols: Vec<Symbol> = Vec::with_capacity(coins.len());
        for coin in coins {
            if !symbols.contains(&coin.symbol) {
                symbols.push(coin.symbol.clone());
            }
        }
        if symbols.is_empty() { Self::NoMatch } else { Self::Matched(symbols) }
    }

    pub fn symbols(&self) -> Option<&[Symbol]> {
        match self {
            Self::Matched(symbols) => Some(symbols),
            Self::Unset | Self::NoMatch => None,
        }
    }
}

/// List and chart filters live side by side; writing one never touches the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    list: FilterSlot,
    chart: FilterSlot,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &FilterSlot {
        &self.list
    }

    pub fn chart(&self) -> &FilterSlot {
        &self.chart
    }

    pub fn set_list(&mut self, slot: FilterSlot) {
        self.list = slot;
    }

    pub fn set_chart(&mut self, slot: FilterSlot) {
        self.chart = slot;
    }

    pub fn clear_list(&mut self) {
        self.list = FilterSlot::Unset;
    }

    pub fn clear_chart(&mut self) {
        self.chart = FilterSlot::Unset;
    }
}
