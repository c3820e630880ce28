use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::price::{PriceMap, PricePoint};
use crate::models::search::SearchCandidate;

/// Trait abstraction over the external price/search/chart service.
///
/// The CoinGecko client implements it for real traffic; tests plug in
/// mock implementations so no flow depends on the network.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Resolve a free-text query into candidate assets, best match first.
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, CoreError>;

    /// Current price and 24h change for a batch of asset ids.
    /// Ids the service does not know are simply absent from the map.
    async fn simple_prices(&self, ids: &[String], currency: &str) -> Result<PriceMap, CoreError>;

    /// Historical prices for one asset, oldest first.
    async fn market_chart(
        &self,
        id: &str,
        currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, CoreError>;
}
