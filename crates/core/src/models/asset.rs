use serde::{Deserialize, Serialize};

use super::price::PriceQuote;

/// One pinned watchlist entry.
///
/// `id` is the external API identifier (e.g. "bitcoin") and is the unique
/// key within a watchlist. `price` and `change` stay `None` until the first
/// successful quote arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// External API identifier, lowercase (e.g., "bitcoin", "avalanche-2")
    pub id: String,

    /// Human-readable name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker symbol, uppercased (e.g., "BTC")
    pub symbol: String,

    /// Last known price in the display currency
    #[serde(default)]
    pub price: Option<f64>,

    /// Last known 24-hour change in percent
    #[serde(default)]
    pub change: Option<f64>,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into().to_uppercase(),
            price: None,
            change: None,
        }
    }

    /// Build an asset with a quote already attached.
    pub fn with_quote(mut self, quote: &PriceQuote) -> Self {
        self.apply_quote(quote);
        self
    }

    /// Overwrite price and change with a freshly fetched quote.
    pub fn apply_quote(&mut self, quote: &PriceQuote) {
        self.price = Some(quote.price);
        self.change = quote.change;
    }

    /// Whether the last known 24h change is non-negative.
    /// Assets without a change yet count as rising, like a zero change.
    #[must_use]
    pub fn is_rising(&self) -> bool {
        self.change.map_or(true, |c| c >= 0.0)
    }

    /// Price formatted with two decimals, or a dash when unknown.
    #[must_use]
    pub fn display_price(&self) -> String {
        self.price
            .map(|p| format!("{p:.2}"))
            .unwrap_or_else(|| "-".to_string())
    }

    /// 24h change formatted as a percentage with two decimals.
    #[must_use]
    pub fn display_change(&self) -> String {
        self.change
            .map(|c| format!("{c:.2}%"))
            .unwrap_or_else(|| "-".to_string())
    }
}
