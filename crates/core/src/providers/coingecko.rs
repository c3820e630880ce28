use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::{PriceMap, PricePoint, PriceQuote};
use crate::models::search::SearchCandidate;
use crate::models::settings::Settings;
use super::traits::MarketDataProvider;

const PROVIDER: &str = "CoinGecko";

/// CoinGecko v3 public API provider.
///
/// - **Free**: No API key required for the public endpoints.
/// - **Endpoints**: `/search`, `/simple/price`, `/coins/{id}/market_chart`.
/// - **Ids**: lowercase slugs like "bitcoin", "avalanche-2".
///
/// Response bodies are parsed into typed records and validated here, so
/// nothing malformed reaches the watchlist.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    /// Build a client using the base URL and timeout from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.http_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with `query` and return the body of a successful response.
    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, CoreError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(provider = PROVIDER, %path, "GET");

        let resp = self.client.get(&url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::HttpStatus {
                provider: PROVIDER.into(),
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CoinGeckoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinGeckoProvider")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

#[derive(Deserialize)]
struct SearchCoin {
    id: String,
    name: String,
    symbol: String,
}

/// `/simple/price` body: id → { "eur": price, "eur_24h_change": pct }
type SimplePriceResponse = HashMap<String, HashMap<String, Option<f64>>>;

#[derive(Deserialize)]
struct MarketChartResponse {
    prices: Option<Vec<(f64, f64)>>,
}

// ── Parsing ─────────────────────────────────────────────────────────

/// Parse a `/search` body. A missing `coins` array means no matches.
pub fn parse_search(body: &str) -> Result<Vec<SearchCandidate>, CoreError> {
    let resp: SearchResponse = serde_json::from_str(body)
        .map_err(|e| CoreError::malformed(PROVIDER, format!("Failed to parse search response: {e}")))?;

    Ok(resp
        .coins
        .into_iter()
        .filter(|c| !c.id.trim().is_empty())
        .map(|c| SearchCandidate {
            id: c.id,
            name: c.name,
            symbol: c.symbol,
        })
        .collect())
}

/// Parse a `/simple/price` body for `currency`.
///
/// Entries without a usable price (missing, null, non-finite or negative)
/// are left out of the map.
pub fn parse_simple_prices(body: &str, currency: &str) -> Result<PriceMap, CoreError> {
    let resp: SimplePriceResponse = serde_json::from_str(body)
        .map_err(|e| CoreError::malformed(PROVIDER, format!("Failed to parse price response: {e}")))?;

    let currency = currency.to_lowercase();
    let change_key = format!("{currency}_24h_change");
    let mut prices = PriceMap::with_capacity(resp.len());

    for (id, fields) in resp {
        let price = match fields.get(&currency).copied().flatten() {
            Some(p) if p.is_finite() && p >= 0.0 => p,
            other => {
                tracing::debug!(%id, price = ?other, "Dropping quote without a valid price");
                continue;
            }
        };
        let change = fields
            .get(&change_key)
            .copied()
            .flatten()
            .filter(|c| c.is_finite());
        prices.insert(id, PriceQuote::new(price, change));
    }

    Ok(prices)
}

/// Parse a `/coins/{id}/market_chart` body.
///
/// A body without a `prices` array is malformed. Samples with invalid
/// timestamps or prices are skipped; order is preserved.
pub fn parse_market_chart(body: &str) -> Result<Vec<PricePoint>, CoreError> {
    let resp: MarketChartResponse = serde_json::from_str(body)
        .map_err(|e| CoreError::malformed(PROVIDER, format!("Failed to parse market chart: {e}")))?;

    let samples = resp
        .prices
        .ok_or_else(|| CoreError::malformed(PROVIDER, "Market chart response has no prices"))?;

    Ok(samples
        .into_iter()
        .filter_map(|(ts, price)| {
            if !ts.is_finite() || !price.is_finite() || price < 0.0 {
                return None;
            }
            PricePoint::from_millis(ts as i64, price)
        })
        .collect())
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, CoreError> {
        let body = self
            .get_text("/search", &[("query", query.trim().to_string())])
            .await?;
        parse_search(&body)
    }

    async fn simple_prices(&self, ids: &[String], currency: &str) -> Result<PriceMap, CoreError> {
        if ids.is_empty() {
            return Ok(PriceMap::new());
        }
        let body = self
            .get_text(
                "/simple/price",
                &[
                    ("ids", ids.join(",")),
                    ("vs_currencies", currency.to_lowercase()),
                    ("include_24hr_change", "true".to_string()),
                ],
            )
            .await?;
        parse_simple_prices(&body, currency)
    }

    async fn market_chart(
        &self,
        id: &str,
        currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, CoreError> {
        if id.is_empty() || id.contains('/') {
            return Err(CoreError::Validation(format!("Invalid asset id '{id}'")));
        }
        let body = self
            .get_text(
                &format!("/coins/{id}/market_chart"),
                &[
                    ("vs_currency", currency.to_lowercase()),
                    ("days", days.to_string()),
                    ("interval", "daily".to_string()),
                ],
            )
            .await?;
        parse_market_chart(&body)
    }
}

