use futures::future::LocalBoxFuture;

use super::GlooHttpClient;
use crate::domain::{
    errors::{DashboardError, DashboardResult},
    logging::LogComponent,
    market_data::{CatalogSource, Coin},
};
use crate::infrastructure::dto::parse_catalog;
use crate::log_info;

/// Coin-listing client for the startup catalog
pub struct CoinGeckoClient {
    http: GlooHttpClient,
    catalog_url: String,
}

impl CoinGeckoClient {
    pub fn new(catalog_url: &str) -> Self {
        Self { http: GlooHttpClient::new(), catalog_url: catalog_url.to_string() }
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    async fn load(&self) -> DashboardResult<Vec<Coin>> {
        let body = self.http.get_text(&self.catalog_url).await.map_err(DashboardError::CatalogFetch)?;
        let coins = parse_catalog(&body)?;

        log_info!(LogComponent::Infrastructure("CoinGecko"), "Loaded {} coins", coins.len());

        Ok(coins)
    }
}

impl CatalogSource for CoinGeckoClient {
    fn fetch_catalog(&self) -> LocalBoxFuture<'_, DashboardResult<Vec<Coin>>> {
        Box::pin(self.load())
    }
}
