use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::providers::aliases::SymbolAliases;
use crate::providers::traits::MarketDataProvider;

use super::watchlist_store::{lock_store, WatchlistStore};

/// Result of one search-and-pin attempt that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The best match was priced and appended to the watchlist.
    Added(Asset),
    /// The best match is already pinned; no price request was made.
    AlreadyPinned(String),
    /// The search endpoint returned no candidates.
    NotFound,
    /// Another lookup is still in flight; this trigger was ignored.
    Busy,
    /// The query was blank; nothing was requested.
    EmptyQuery,
}

impl SearchOutcome {
    /// Whether the host should clear its search input after this outcome.
    pub fn clears_input(&self) -> bool {
        matches!(self, SearchOutcome::Added(_) | SearchOutcome::AlreadyPinned(_))
    }
}

/// Releases the busy flag on every exit path, including errors.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Resolves a free-text query to an asset, prices it and pins it.
///
/// At most one lookup runs at a time; overlapping triggers return
/// `SearchOutcome::Busy` without touching the network.
#[derive(Debug, Default)]
pub struct SearchService {
    busy: AtomicBool,
    aliases: Option<SymbolAliases>,
}

impl SearchService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search service that maps queries through `aliases` first.
    pub fn with_aliases(aliases: SymbolAliases) -> Self {
        Self {
            busy: AtomicBool::new(false),
            aliases: Some(aliases),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The query actually sent to the search endpoint.
    pub fn normalize_query(&self, query: &str) -> String {
        match &self.aliases {
            Some(aliases) => aliases.resolve(query),
            None => query.trim().to_string(),
        }
    }

    /// Run the full lookup flow for `query`.
    ///
    /// 1. search → first candidate (none → `NotFound`)
    /// 2. already pinned → `AlreadyPinned`, no price request
    /// 3. fetch quote → build asset → append
    ///
    /// Any failure leaves the store unchanged.
    pub async fn search_and_add(
        &self,
        provider: &dyn MarketDataProvider,
        store: &Mutex<WatchlistStore>,
        query: &str,
        currency: &str,
    ) -> Result<SearchOutcome, CoreError> {
        let query = self.normalize_query(query);
        if query.is_empty() {
            return Ok(SearchOutcome::EmptyQuery);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(%query, "Search already in flight, ignoring trigger");
            return Ok(SearchOutcome::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        let candidates = provider.search(&query).await?;
        let Some(best) = candidates.into_iter().next() else {
            tracing::info!(%query, "No search results");
            return Ok(SearchOutcome::NotFound);
        };

        if lock_store(store).contains(&best.id) {
            return Ok(SearchOutcome::AlreadyPinned(best.id));
        }

        let prices = provider
            .simple_prices(std::slice::from_ref(&best.id), currency)
            .await?;
        let quote = prices.get(&best.id).ok_or_else(|| {
            CoreError::malformed(provider.name(), format!("No price returned for '{}'", best.id))
        })?;

        let asset = Asset::new(best.id, best.name, best.symbol).with_quote(quote);

        // A concurrent flow may have pinned it while the price was in flight.
        match lock_store(store).add(asset.clone()) {
            Ok(()) => Ok(SearchOutcome::Added(asset)),
            Err(CoreError::AlreadyPinned(id)) => Ok(SearchOutcome::AlreadyPinned(id)),
            Err(e) => Err(e),
        }
    }
}
