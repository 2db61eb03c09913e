pub mod coingecko_client;
pub mod cryptocompare_client;

pub use coingecko_client::CoinGeckoClient;
pub use cryptocompare_client::CryptoCompareClient;

use crate::domain::logging::{LogComponent, LogLevel, get_logger};
use gloo_net::http::Request;
use crate::{log_debug, log_trace};

/// Thin gloo-based GET client shared by the upstream adapters
#[derive(Clone)]
pub struct GlooHttpClient {
    default_headers: Vec<(String, String)>,
}

impl Default for GlooHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GlooHttpClient {
    pub fn new() -> Self {
        Self {
            default_headers: vec![("Accept".to_string(), "application/json".to_string())],
        }
    }

    /// GET `url` and return the body text. Transport errors and non-2xx
    /// statuses come back as a plain message; callers pick the error kind.
    pub async fn get_text(&self, url: &str) -> Result<String, String> {
        log_debug!(LogComponent::Infrastructure("HTTP"), "GET {}", url);

        let mut request = Request::get(url);
        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| format!("request failed: {e}"))?;

        if !response.ok() {
            let error_msg = format!("HTTP {} {}", response.status(), response.status_text());
            get_logger().log_with_metadata(LogLevel::Warn, LogComponent::Infrastructure("HTTP"), &error_msg, url);
            return Err(error_msg);
        }

        let text = response.text().await.map_err(|e| format!("failed to read body: {e}"))?;

        log_trace!(LogComponent::Infrastructure("HTTP"), "GET {} -> {} bytes", url, text.len());

        Ok(text)
    }
}

/// URL helpers
pub struct HttpUtils;

impl HttpUtils {
    /// Append `params` in order; empty values are kept as `key=`.
    pub fn build_url_with_params(base_url: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return base_url.to_string();
        }

        let query_string: String = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, Self::url_encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if base_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", base_url, separator, query_string)
    }

    /// Percent-encode the handful of characters that break a query string.
    /// Commas are left alone: they separate symbols.
    pub fn url_encode(input: &str) -> String {
        input
            .replace('%', "%25")
            .replace(' ', "%20")
            .replace('&', "%26")
            .replace('=', "%3D")
            .replace('?', "%3F")
            .replace('#', "%23")
    }
}
