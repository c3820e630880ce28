use std::sync::Mutex;

use crate::errors::CoreError;
use crate::providers::traits::MarketDataProvider;

use super::watchlist_store::{lock_store, WatchlistStore};

/// One batched price refresh for every pinned asset.
///
/// - Empty watchlist → no request, `Ok(0)`.
/// - One `/simple/price` call with all ids comma-joined.
/// - Assets missing from the response keep their stale quotes.
///
/// Returns the number of assets updated.
pub async fn refresh_once(
    provider: &dyn MarketDataProvider,
    store: &Mutex<WatchlistStore>,
    currency: &str,
) -> Result<usize, CoreError> {
    let ids = lock_store(store).ids();
    if ids.is_empty() {
        return Ok(0);
    }

    let prices = provider.simple_prices(&ids, currency).await?;
    let updated = lock_store(store).refresh_all(&prices);
    if updated < ids.len() {
        tracing::debug!(
            requested = ids.len(),
            updated,
            "Some assets missing from price response, keeping stale quotes"
        );
    }
    Ok(updated)
}

#[cfg(not(target_arch = "wasm32"))]
pub use self::native::RefreshLoop;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;
    use tokio::time::{interval_at, Instant, MissedTickBehavior};

    use crate::providers::traits::MarketDataProvider;
    use crate::services::watchlist_store::SharedStore;

    use super::refresh_once;

    /// Background task refreshing prices on a fixed period.
    ///
    /// The first tick fires one full period after `start`. A failed tick is
    /// logged and skipped; the next regular tick is the only retry.
    /// Dropping the handle aborts the task.
    pub struct RefreshLoop {
        handle: Option<JoinHandle<()>>,
        shutdown: Option<oneshot::Sender<()>>,
        ticks: Arc<AtomicU64>,
        period: Duration,
    }

    impl RefreshLoop {
        /// Spawn the loop on the current tokio runtime.
        pub fn start(
            provider: Arc<dyn MarketDataProvider>,
            store: SharedStore,
            currency: String,
            period: Duration,
        ) -> Self {
            let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
            let ticks = Arc::new(AtomicU64::new(0));
            let tick_counter = Arc::clone(&ticks);

            let handle = tokio::spawn(async move {
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                tracing::info!(period_secs = period.as_secs(), "Price refresh loop started");

                loop {
                    tokio::select! {
                        _ = &mut shutdown_rx => break,
                        _ = interval.tick() => {
                            match refresh_once(provider.as_ref(), &store, &currency).await {
                                Ok(updated) => tracing::debug!(updated, "Refreshed prices"),
                                Err(e) => tracing::warn!(error = %e, "Price refresh failed, skipping tick"),
                            }
                            tick_counter.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }

                tracing::info!("Price refresh loop stopped");
            });

            Self {
                handle: Some(handle),
                shutdown: Some(shutdown_tx),
                ticks,
                period,
            }
        }

        pub fn period(&self) -> Duration {
            self.period
        }

        /// Number of completed ticks, successful or not.
        pub fn ticks(&self) -> u64 {
            self.ticks.load(Ordering::Relaxed)
        }

        pub fn is_running(&self) -> bool {
            self.handle.as_ref().is_some_and(|h| !h.is_finished())
        }

        /// Ask the loop to stop and wait until it has exited.
        pub async fn shutdown(mut self) {
            if let Some(tx) = self.shutdown.take() {
                let _ = tx.send(());
            }
            if let Some(handle) = self.handle.take() {
                let _ = handle.await;
            }
        }
    }

    impl Drop for RefreshLoop {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.abort();
            }
        }
    }

    impl std::fmt::Debug for RefreshLoop {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("RefreshLoop")
                .field("period", &self.period)
                .field("ticks", &self.ticks())
                .field("running", &self.is_running())
                .finish()
        }
    }
}
