use futures::future::LocalBoxFuture;

use super::entities::{Coin, PriceBatch, Symbol};
use crate::domain::errors::DashboardResult;

/// Source of the startup coin catalog
pub trait CatalogSource {
    /// One-shot fetch; failures map to `CatalogFetch` or `Parse`.
    fn fetch_catalog(&self) -> LocalBoxFuture<'_, DashboardResult<Vec<Coin>>>;
}

/// Source of multi-symbol spot prices, queried once per tick
pub trait PriceFeed {
    /// All `symbols` in a single request. Failures map to `TickFetch` or `Parse`.
    fn fetch_prices<'a>(&'a self, symbols: &'a [Symbol]) -> LocalBoxFuture<'a, DashboardResult<PriceBatch>>;
}
