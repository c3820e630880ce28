pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::{Arc, Mutex, MutexGuard};

use models::{asset::Asset, chart::TimeRange, notice::Notice, settings::Settings};
use providers::{aliases::SymbolAliases, coingecko::CoinGeckoProvider, traits::MarketDataProvider};
#[cfg(not(target_arch = "wasm32"))]
use services::refresh_service::RefreshLoop;
use services::{
    chart_service::{ChartOutcome, ChartService, ChartTicket, DetailState, DetailView},
    refresh_service,
    reorder_service::ReorderController,
    search_service::{SearchOutcome, SearchService},
    watchlist_store::{lock_store, SharedStore, WatchlistStore},
};
use storage::backend::KeyValueStore;

use errors::CoreError;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Main entry point for the crypto watchlist core library.
///
/// Owns the watchlist, the transient UI state (search input, detail view,
/// pending notices) and the background refresh loop. All methods take
/// `&self`, so a host can share one tracker between its event handlers.
#[must_use]
pub struct CryptoTracker {
    settings: Settings,
    provider: Arc<dyn MarketDataProvider>,
    store: SharedStore,
    search: SearchService,
    reorder: Mutex<ReorderController>,
    detail: Mutex<DetailView>,
    search_term: Mutex<String>,
    notices: Mutex<Vec<Notice>>,
    #[cfg(not(target_arch = "wasm32"))]
    refresh_loop: Mutex<Option<RefreshLoop>>,
}

impl std::fmt::Debug for CryptoTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoTracker")
            .field("provider", &self.provider.name())
            .field("assets", &lock_store(&self.store).len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl CryptoTracker {
    /// Build a tracker on top of `provider`, loading the persisted watchlist
    /// from `storage`.
    ///
    /// Fails on invalid settings or a stored watchlist that does not parse.
    pub fn new(
        settings: Settings,
        provider: Arc<dyn MarketDataProvider>,
        storage: Box<dyn KeyValueStore>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let store = WatchlistStore::load(storage, settings.storage_key.clone())?;

        let search = if settings.resolve_aliases {
            SearchService::with_aliases(SymbolAliases::new())
        } else {
            SearchService::new()
        };

        Ok(Self {
            detail: Mutex::new(DetailView::from_settings(&settings)),
            settings,
            provider,
            store: store.into_shared(),
            search,
            reorder: Mutex::new(ReorderController::new()),
            search_term: Mutex::new(String::new()),
            notices: Mutex::new(Vec::new()),
            #[cfg(not(target_arch = "wasm32"))]
            refresh_loop: Mutex::new(None),
        })
    }

    /// Tracker talking to the CoinGecko API configured in `settings`.
    pub fn with_coingecko(settings: Settings, storage: Box<dyn KeyValueStore>) -> Result<Self, CoreError> {
        let provider = Arc::new(CoinGeckoProvider::from_settings(&settings));
        Self::new(settings, provider, storage)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Watchlist ───────────────────────────────────────────────────

    /// Snapshot of the pinned assets in display order.
    #[must_use]
    pub fn assets(&self) -> Vec<Asset> {
        lock_store(&self.store).assets().to_vec()
    }

    #[must_use]
    pub fn asset_count(&self) -> usize {
        lock_store(&self.store).len()
    }

    #[must_use]
    pub fn is_pinned(&self, id: &str) -> bool {
        lock_store(&self.store).contains(id)
    }

    /// Unpin an asset. Returns whether it was pinned.
    pub fn remove_asset(&self, id: &str) -> bool {
        lock_store(&self.store).remove(id)
    }

    // ── Search ──────────────────────────────────────────────────────

    pub fn set_search_term(&self, term: impl Into<String>) {
        *lock(&self.search_term) = term.into();
    }

    #[must_use]
    pub fn search_term(&self) -> String {
        lock(&self.search_term).clone()
    }

    /// Whether a lookup is in flight (the host disables its input meanwhile).
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.search.is_busy()
    }

    /// Search for the current search term and pin the best match.
    ///
    /// Not-found, duplicate and failure cases queue a notice. Failures are
    /// also returned so the host can log them.
    pub async fn submit_search(&self) -> Result<SearchOutcome, CoreError> {
        let term = self.search_term();
        let result = self
            .search
            .search_and_add(self.provider.as_ref(), &self.store, &term, &self.settings.currency)
            .await;

        match &result {
            Ok(outcome) => {
                match outcome {
                    SearchOutcome::AlreadyPinned(id) => {
                        self.push_notice(Notice::AlreadyPinned { id: id.clone() })
                    }
                    SearchOutcome::NotFound => self.push_notice(Notice::NotFound { query: term }),
                    _ => {}
                }
                if outcome.clears_input() {
                    lock(&self.search_term).clear();
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Search failed");
                self.push_notice(Notice::SearchFailed);
            }
        }

        result
    }

    // ── Reordering ──────────────────────────────────────────────────

    pub fn drag_start(&self, id: &str) {
        lock(&self.reorder).drag_start(id);
    }

    pub fn drag_cancel(&self) {
        lock(&self.reorder).drag_cancel();
    }

    /// A drag of `active_id` ended over `over_id`. Returns whether the
    /// order changed.
    pub fn drag_end(&self, active_id: &str, over_id: Option<&str>) -> Result<bool, CoreError> {
        let mut store = lock_store(&self.store);
        lock(&self.reorder).drag_end(&mut store, active_id, over_id)
    }

    // ── Detail view ─────────────────────────────────────────────────

    #[must_use]
    pub fn detail_state(&self) -> DetailState {
        lock(&self.detail).state().clone()
    }

    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        lock(&self.detail).time_range()
    }

    /// Open the detail view for a pinned asset and load its chart.
    pub async fn select_asset(&self, id: &str) -> Result<DetailState, CoreError> {
        let asset = lock_store(&self.store)
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let ticket = lock(&self.detail).select(asset);
        self.load_chart(ticket).await;
        Ok(self.detail_state())
    }

    /// Change the range selector, re-fetching when an asset is open.
    pub async fn set_time_range(&self, range: TimeRange) -> DetailState {
        let ticket = lock(&self.detail).set_time_range(range);
        if let Some(ticket) = ticket {
            self.load_chart(ticket).await;
        }
        self.detail_state()
    }

    pub fn close_detail(&self) {
        lock(&self.detail).close();
    }

    async fn load_chart(&self, ticket: ChartTicket) {
        let currency = &self.settings.currency;
        let result = ChartService::fetch(self.provider.as_ref(), &ticket, currency).await;
        let outcome = lock(&self.detail).complete(&ticket, result, currency);
        if outcome == ChartOutcome::Failed {
            self.push_notice(Notice::ChartUnavailable { id: ticket.id });
        }
    }

    // ── Price refresh ───────────────────────────────────────────────

    /// Refresh all pinned prices once. Returns the number updated.
    pub async fn refresh_prices(&self) -> Result<usize, CoreError> {
        refresh_service::refresh_once(self.provider.as_ref(), &self.store, &self.settings.currency)
            .await
    }

    /// Start the periodic refresh. Must be called inside a tokio runtime.
    /// Returns `false` if the loop is already running.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn start_refresh_loop(&self) -> bool {
        let mut slot = lock(&self.refresh_loop);
        if slot.as_ref().is_some_and(RefreshLoop::is_running) {
            return false;
        }
        *slot = Some(RefreshLoop::start(
            Arc::clone(&self.provider),
            Arc::clone(&self.store),
            self.settings.currency.clone(),
            self.settings.refresh_interval(),
        ));
        true
    }

    /// Stop the periodic refresh and wait for it to exit.
    /// Returns `false` if no loop was running.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn stop_refresh_loop(&self) -> bool {
        let running = lock(&self.refresh_loop).take();
        match running {
            Some(refresh_loop) => {
                refresh_loop.shutdown().await;
                true
            }
            None => false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn is_refresh_loop_running(&self) -> bool {
        lock(&self.refresh_loop)
            .as_ref()
            .is_some_and(RefreshLoop::is_running)
    }

    /// Ticks completed by the running refresh loop (0 when stopped).
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn refresh_ticks(&self) -> u64 {
        lock(&self.refresh_loop)
            .as_ref()
            .map_or(0, RefreshLoop::ticks)
    }

    // ── Notices ─────────────────────────────────────────────────────

    /// Drain queued notices, oldest first.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *lock(&self.notices))
    }

    fn push_notice(&self, notice: Notice) {
        tracing::info!(%notice, "Notice");
        lock(&self.notices).push(notice);
    }
}
