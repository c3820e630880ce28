use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::models::price::PriceMap;
use crate::storage::backend::KeyValueStore;
use crate::storage::manager::StorageManager;

use super::reorder_service::move_item;

/// Store shared between the facade and the background refresh task.
pub type SharedStore = Arc<Mutex<WatchlistStore>>;

/// Lock a shared store, recovering the data if a previous holder panicked.
pub fn lock_store(store: &Mutex<WatchlistStore>) -> MutexGuard<'_, WatchlistStore> {
    store.lock().unwrap_or_else(|e| e.into_inner())
}

/// Canonical ordered list of pinned assets for the session.
///
/// Every method that changes membership, order or quotes writes the full
/// list back to durable storage before returning. Write failures are
/// logged and otherwise ignored: the in-memory list stays authoritative.
pub struct WatchlistStore {
    assets: Vec<Asset>,
    storage: Box<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for WatchlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchlistStore")
            .field("key", &self.key)
            .field("assets", &self.assets.len())
            .finish()
    }
}

impl WatchlistStore {
    /// Load the persisted watchlist under `key`.
    ///
    /// Nothing stored yet → empty list. A stored value that does not parse
    /// is an error, so corruption surfaces instead of being overwritten.
    pub fn load(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self, CoreError> {
        let key = key.into();
        let assets = StorageManager::load(storage.as_ref(), &key)?;
        tracing::info!(key = %key, assets = assets.len(), "Loaded watchlist");
        Ok(Self {
            assets,
            storage,
            key,
        })
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.assets.iter().position(|a| a.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Ids in display order.
    pub fn ids(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.id.clone()).collect()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Append an asset. Rejects an id that is already pinned.
    pub fn add(&mut self, asset: Asset) -> Result<(), CoreError> {
        if self.contains(&asset.id) {
            return Err(CoreError::AlreadyPinned(asset.id));
        }
        tracing::info!(id = %asset.id, "Pinned asset");
        self.assets.push(asset);
        self.persist();
        Ok(())
    }

    /// Remove the asset with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.assets.remove(idx);
        tracing::info!(%id, "Unpinned asset");
        self.persist();
        true
    }

    /// Move the asset at `from` to `to`, shifting the others.
    /// Returns `Ok(false)` when the positions are equal.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<bool, CoreError> {
        let len = self.assets.len();
        if from >= len || to >= len {
            return Err(CoreError::Validation(format!(
                "Reorder indices {from} -> {to} out of range for {len} assets"
            )));
        }
        if from == to {
            return Ok(false);
        }
        move_item(&mut self.assets, from, to);
        tracing::debug!(from, to, "Reordered watchlist");
        self.persist();
        Ok(true)
    }

    /// Merge fetched quotes into the list.
    ///
    /// Assets absent from `prices` keep their previous values.
    /// Returns the number of assets updated.
    pub fn refresh_all(&mut self, prices: &PriceMap) -> usize {
        let mut updated = 0;
        for asset in &mut self.assets {
            if let Some(quote) = prices.get(&asset.id) {
                asset.apply_quote(quote);
                updated += 1;
            }
        }
        if updated > 0 {
            self.persist();
        }
        updated
    }

    // ── Internal ────────────────────────────────────────────────────

    fn persist(&self) {
        if let Err(e) = StorageManager::save(self.storage.as_ref(), &self.key, &self.assets) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist watchlist");
        }
    }
}
