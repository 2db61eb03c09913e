use futures::future::LocalBoxFuture;

use super::{GlooHttpClient, HttpUtils};
use crate::domain::{
    errors::{DashboardError, DashboardResult},
    market_data::{PriceBatch, PriceFeed, QuoteCurrency, Symbol},
};
use crate::infrastructure::dto::parse_price_batch;

/// Multi-symbol spot price client, one request per tick
pub struct CryptoCompareClient {
    http: GlooHttpClient,
    base_url: String,
    quote: QuoteCurrency,
    api_key: Option<String>,
}

impl CryptoCompareClient {
    pub fn new(base_url: &str, quote: QuoteCurrency) -> Self {
        Self { http: GlooHttpClient::new(), base_url: base_url.to_string(), quote, api_key: None }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// `...?fsyms=BTC,ETH&tsyms=USD[&api_key=...]`
    pub fn price_url(&self, symbols: &[Symbol]) -> String {
        let fsyms = symbols.iter().map(Symbol::value).collect::<Vec<_>>().join(",");
        let mut params = vec![("fsyms", fsyms.as_str()), ("tsyms", self.quote.as_ref())];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.as_str()));
        }
        HttpUtils::build_url_with_params(&self.base_url, &params)
    }

    async fn load(&self, symbols: &[Symbol]) -> DashboardResult<PriceBatch> {
        let url = self.price_url(symbols);
        let body = self.http.get_text(&url).await.map_err(DashboardError::TickFetch)?;
        parse_price_batch(&body, self.quote)
    }
}

impl PriceFeed for CryptoCompareClient {
    fn fetch_prices<'a>(&'a self, symbols: &'a [Symbol]) -> LocalBoxFuture<'a, DashboardResult<PriceBatch>> {
        Box::pin(self.load(symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_url_joins_upper_case_symbols() {
        let client = CryptoCompareClient::new("https://min-api.cryptocompare.com/data/pricemulti", QuoteCurrency::Usd);
        let url = client.price_url(&[Symbol::from("btc"), Symbol::from("eth")]);
        assert_eq!(url, "https://min-api.cryptocompare.com/data/pricemulti?fsyms=BTC,ETH&tsyms=USD");
    }

    #[test]
    fn price_url_carries_api_key() {
        let client = CryptoCompareClient::new("https://p", QuoteCurrency::Usd).with_api_key(Some("secret".into()));
        assert_eq!(client.price_url(&[Symbol::from("BTC")]), "https://p?fsyms=BTC&tsyms=USD&api_key=secret");
    }
}
