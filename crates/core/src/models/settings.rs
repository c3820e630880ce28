use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Default CoinGecko v3 endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Storage key the watchlist is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "pinnedCryptos";

/// Runtime configuration supplied by the host.
///
/// Every field has a default, so a host config file only needs to name
/// what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display currency as the API expects it (lowercase, e.g. "eur").
    pub currency: String,

    /// Base URL of the price/search API.
    pub api_base_url: String,

    /// Period of the background price refresh, in seconds.
    pub refresh_interval_secs: u64,

    /// Days of history fetched for the detail chart.
    pub chart_days: u32,

    /// Key under which the watchlist is persisted.
    pub storage_key: String,

    /// HTTP request timeout in seconds (native builds only).
    pub http_timeout_secs: u64,

    /// Map the search query through the symbol alias table before searching.
    pub resolve_aliases: bool,

    /// Let the selected time range drive the chart window instead of `chart_days`.
    pub chart_follows_range: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "eur".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval_secs: 60,
            chart_days: 7,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            http_timeout_secs: 30,
            resolve_aliases: false,
            chart_follows_range: false,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document, then normalize and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.currency = settings.currency.trim().to_lowercase();
        settings.validate()?;
        Ok(settings)
    }

    /// Check invariants the rest of the library relies on.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::Validation(format!(
                "Invalid currency code '{}': must be exactly 3 ASCII letters (e.g., eur, usd)",
                self.currency
            )));
        }
        if self.refresh_interval_secs == 0 {
            return Err(CoreError::Validation(
                "Refresh interval must be at least one second".into(),
            ));
        }
        if self.http_timeout_secs == 0 {
            return Err(CoreError::Validation(
                "HTTP timeout must be at least one second".into(),
            ));
        }
        if self.chart_days == 0 {
            return Err(CoreError::Validation(
                "Chart window must cover at least one day".into(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(CoreError::Validation("Storage key must not be empty".into()));
        }
        Ok(())
    }

    /// Refresh period as a `Duration`.
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs)
    }
}
