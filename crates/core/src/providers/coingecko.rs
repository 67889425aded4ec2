use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::price::PriceSample;
use crate::models::settings::{Settings, DEFAULT_API_BASE};
use super::traits::PriceHistoryProvider;

const PROVIDER_NAME: &str = "CoinGecko";

/// CoinGecko API provider for cryptocurrency price history.
///
/// - **Free**: No API key required for the public `market_chart` endpoint.
/// - **Endpoint**: `/coins/{id}/market_chart?vs_currency={cur}&days={n}`
/// - **Ids**: lowercase CoinGecko ids like "bitcoin", "ethereum".
///
/// No retries: a failed request surfaces immediately and the caller decides.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Provider against the public CoinGecko API, without a request timeout.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Provider against a custom base URL (mirrors, proxies, local test servers).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Provider configured from application settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match settings.request_timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder,
        };
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a coin's market chart.
    pub fn market_chart_url(&self, coin: &str, vs_currency: &str, days: u32) -> String {
        format!(
            "{}/coins/{coin}/market_chart?vs_currency={vs_currency}&days={days}",
            self.base_url
        )
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct MarketChartResponse {
    /// `[timestamp_ms, price]`; CoinGecko sends both as JSON numbers
    prices: Vec<[f64; 2]>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceHistoryProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_market_chart(
        &self,
        coin: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<PriceSample>, CoreError> {
        let url = self.market_chart_url(coin, vs_currency, days);
        debug!(%url, "requesting market chart");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::HttpStatus {
                provider: PROVIDER_NAME.into(),
                status: status.as_u16(),
            });
        }

        let body: MarketChartResponse = response.json().await.map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse market chart for {coin}: {e}"))
        })?;

        Ok(body
            .prices
            .iter()
            .map(|[timestamp, price]| PriceSample {
                timestamp_ms: *timestamp as i64,
                price: *price,
            })
            .collect())
    }
}
