use serde::Deserialize;

use crate::domain::{errors::DashboardError, market_data::QuoteCurrency};

pub const DEFAULT_CATALOG_URL: &str = "https://api.coingecko.com/api/v3/coins/";
pub const DEFAULT_PRICE_URL: &str = "https://min-api.cryptocompare.com/data/pricemulti";
pub const DEFAULT_POLL_PERIOD_MS: u32 = 2_000;

/// Runtime settings. Every field has a default, so a partial JSON blob is enough
/// to override a single endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub catalog_url: String,
    pub price_url: String,
    pub quote_currency: QuoteCurrency,
    pub poll_period_ms: u32,
    pub api_key: Option<String>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            price_url: DEFAULT_PRICE_URL.to_string(),
            quote_currency: QuoteCurrency::Usd,
            poll_period_ms: DEFAULT_POLL_PERIOD_MS,
            api_key: None,
            canvas_width: 900,
            canvas_height: 420,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> Result<Self, DashboardError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validated()
    }

    /// Read the optional `<script id="dashboard-config" type="application/json">`
    /// block from the page, falling back to defaults when absent.
    pub fn from_document() -> Result<Self, DashboardError> {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("dashboard-config"))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_price_url(mut self, url: &str) -> Self {
        self.price_url = url.to_string();
        self
    }

    pub fn with_poll_period_ms(mut self, period_ms: u32) -> Self {
        self.poll_period_ms = period_ms;
        self
    }

    fn validated(self) -> Result<Self, DashboardError> {
        if self.poll_period_ms == 0 {
            return Err(DashboardError::Parse("poll_period_ms must be positive".to_string()));
        }
        if self.catalog_url.is_empty() || self.price_url.is_empty() {
            return Err(DashboardError::Parse("endpoint URLs cannot be empty".to_string()));
        }
        Ok(self)
    }
}
