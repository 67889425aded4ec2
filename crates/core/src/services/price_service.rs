use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::price::{PriceCache, PricePoint, PriceSample};
use crate::models::settings::{DateLocale, Settings, LOOKBACK_DAYS, VS_CURRENCY};
use crate::providers::traits::PriceHistoryProvider;

/// Fetches coin price history through a provider, with a session cache in front.
///
/// Cache strategy:
/// - **Hit**: the stored series is returned as-is, no request is made.
/// - **Miss**: one request, full normalization, then a single cache write.
/// - Failures never touch the cache, so a later retry starts from scratch.
pub struct PriceService {
    provider: Box<dyn PriceHistoryProvider>,
    price_decimals: Option<u32>,
    locale: DateLocale,
}

impl PriceService {
    pub fn new(provider: Box<dyn PriceHistoryProvider>, settings: &Settings) -> Self {
        Self {
            provider,
            price_decimals: settings.price_decimals,
            locale: settings.date_locale(),
        }
    }

    /// Override the locale used for date labels.
    pub fn with_locale(mut self, locale: DateLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Get the price history of `coin` over the lookback window.
    ///
    /// 1. Cache hit → return the cached series.
    /// 2. Miss → fetch from the provider, normalize, store, return.
    pub async fn get_price_history(
        &self,
        cache: &mut PriceCache,
        coin: &str,
    ) -> Result<Vec<PricePoint>, CoreError> {
        if coin.trim().is_empty() {
            return Err(CoreError::ValidationError("Coin id must not be empty".into()));
        }

        if let Some(points) = cache.get(coin) {
            debug!(coin, points = points.len(), "price history served from cache");
            return Ok(points.to_vec());
        }

        let samples = self
            .provider
            .get_market_chart(coin, VS_CURRENCY, LOOKBACK_DAYS)
            .await
            .inspect_err(|e| warn!(coin, provider = self.provider.name(), error = %e, "price history fetch failed"))?;

        let points = normalize_samples(&samples, &self.locale, self.price_decimals)?;

        cache.insert(coin, points.clone());
        info!(
            coin,
            provider = self.provider.name(),
            points = points.len(),
            "price history fetched and cached"
        );

        Ok(points)
    }
}

/// Map raw API samples to display points, keeping API order.
///
/// Each timestamp becomes a locale date label. Prices pass through unchanged
/// unless `decimals` asks for rounding. One unrepresentable timestamp fails the
/// whole batch so a partial series is never produced.
pub fn normalize_samples(
    samples: &[PriceSample],
    locale: &DateLocale,
    decimals: Option<u32>,
) -> Result<Vec<PricePoint>, CoreError> {
    samples
        .iter()
        .map(|sample| {
            let date = locale.format_millis(sample.timestamp_ms).ok_or_else(|| {
                CoreError::Deserialization(format!(
                    "Timestamp {} cannot be represented as a date",
                    sample.timestamp_ms
                ))
            })?;
            let price = match decimals {
                Some(places) => round_to(sample.price, places),
                None => sample.price,
            };
            Ok(PricePoint { date, price })
        })
        .collect()
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(15) as i32);
    (value * factor).round() / factor
}
