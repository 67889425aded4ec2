use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::price::PriceSample;

/// Trait abstraction for price-history sources.
///
/// The CoinGecko client implements it for real traffic; tests plug in mocks.
/// Swapping the API means writing one new implementation, nothing else changes.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceHistoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Raw `[timestamp, price]` samples for `coin`, quoted in `vs_currency`,
    /// covering the last `days` days in API order.
    async fn get_market_chart(
        &self,
        coin: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<PriceSample>, CoreError>;
}
