use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current price and 24-hour change for one asset, in the display currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: f64,

    /// 24h change in percent; the API omits it for some thinly traded coins.
    pub change: Option<f64>,
}

impl PriceQuote {
    pub fn new(price: f64, change: Option<f64>) -> Self {
        Self { price, change }
    }
}

/// Batched quote response: asset id → quote.
pub type PriceMap = HashMap<String, PriceQuote>;

/// A single historical price sample from the market chart endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    /// Build a point from an epoch-milliseconds timestamp.
    /// Returns `None` when the timestamp is outside chrono's range.
    pub fn from_millis(millis: i64, price: f64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|timestamp| Self { timestamp, price })
    }
}
