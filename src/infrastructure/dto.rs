//! Wire shapes of the two upstream APIs and their conversion into domain types.

use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::{
    errors::{DashboardError, DashboardResult},
    market_data::{Coin, CurrentPrice, Price, PriceBatch, QuoteCurrency, Symbol},
};

/// DTO for one entry of the coin-listing endpoint
#[derive(Debug, Deserialize)]
pub struct CoinDto {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<ImageDto>,
    #[serde(default)]
    pub market_data: Option<MarketDataDto>,
}

#[derive(Debug, Deserialize)]
pub struct ImageDto {
    #[serde(default)]
    pub thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarketDataDto {
    #[serde(default)]
    pub current_price: CurrentPriceDto,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentPriceDto {
    pub usd: Option<f64>,
    pub eur: Option<f64>,
    pub ils: Option<f64>,
}

impl CoinDto {
    pub fn to_domain_coin(&self) -> DashboardResult<Coin> {
        if self.id.trim().is_empty() {
            return Err(DashboardError::Parse("coin without id".to_string()));
        }
        let symbol = Symbol::new(&self.symbol)
            .map_err(|_| DashboardError::Parse(format!("coin '{}' has no symbol", self.id)))?;

        let prices = self.market_data.as_ref().map(|m| &m.current_price);
        let price = |pick: fn(&CurrentPriceDto) -> Option<f64>| {
            prices.and_then(pick).filter(|p| p.is_finite()).map(Price::new)
        };

        Ok(Coin {
            id: self.id.clone(),
            symbol,
            ticker: self.symbol.clone(),
            name: self.name.clone(),
            thumb: self.image.as_ref().and_then(|i| i.thumb.clone()).unwrap_or_default(),
            current_price: CurrentPrice {
                usd: price(|p| p.usd),
                eur: price(|p| p.eur),
                ils: price(|p| p.ils),
            },
        })
    }
}

/// Parse the catalog body. One malformed entry fails the whole load: the
/// catalog is either complete or empty.
pub fn parse_catalog(body: &str) -> DashboardResult<Vec<Coin>> {
    let dtos: Vec<CoinDto> = serde_json::from_str(body)?;
    dtos.iter().map(CoinDto::to_domain_coin).collect()
}

/// `pricemulti` answers HTTP 200 even on failure, with an error envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceMultiResponse {
    Error {
        #[serde(rename = "Response")]
        response: String,
        #[serde(rename = "Message")]
        message: String,
    },
    Prices(HashMap<String, HashMap<String, f64>>),
}

impl PriceMultiResponse {
    pub fn to_domain_batch(self, quote: QuoteCurrency) -> DashboardResult<PriceBatch> {
        match self {
            PriceMultiResponse::Error { response, message } => {
                Err(DashboardError::TickFetch(format!("{}: {}", response, message)))
            }
            PriceMultiResponse::Prices(by_symbol) => {
                let mut batch = PriceBatch::new();
                for (raw_symbol, quotes) in by_symbol {
                    let symbol = Symbol::new(&raw_symbol)?;
                    let price = quotes
                        .get(quote.as_ref())
                        .copied()
                        .filter(|p| p.is_finite())
                        .ok_or_else(|| {
                            DashboardError::Parse(format!("no {} quote for {}", quote, raw_symbol))
                        })?;
                    batch.insert(symbol, Price::new(price));
                }
                Ok(batch)
            }
        }
    }
}

pub fn parse_price_batch(body: &str, quote: QuoteCurrency) -> DashboardResult<PriceBatch> {
    let response: PriceMultiResponse = serde_json::from_str(body)?;
    response.to_domain_batch(quote)
}
