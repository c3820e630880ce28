use std::collections::HashSet;

use crate::errors::CoreError;
use crate::models::asset::Asset;

use super::backend::KeyValueStore;

/// Watchlist (de)serialization on top of a `KeyValueStore`.
///
/// The whole list is stored as one JSON array under a single key and
/// replaced wholesale on every write.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a watchlist to its JSON array form.
    pub fn save_to_string(assets: &[Asset]) -> Result<String, CoreError> {
        serde_json::to_string(assets)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize watchlist: {e}")))
    }

    /// Parse a stored watchlist.
    ///
    /// Fails on anything that is not a JSON array of assets, and on
    /// duplicate ids, rather than silently starting over.
    pub fn load_from_str(data: &str) -> Result<Vec<Asset>, CoreError> {
        let assets: Vec<Asset> = serde_json::from_str(data)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize watchlist: {e}")))?;

        let mut seen = HashSet::with_capacity(assets.len());
        for asset in &assets {
            if !seen.insert(asset.id.as_str()) {
                return Err(CoreError::Deserialization(format!(
                    "Stored watchlist contains duplicate id '{}'",
                    asset.id
                )));
            }
        }

        Ok(assets)
    }

    /// Write the full watchlist under `key`.
    pub fn save(store: &dyn KeyValueStore, key: &str, assets: &[Asset]) -> Result<(), CoreError> {
        let json = Self::save_to_string(assets)?;
        store.set(key, &json)
    }

    /// Read the watchlist under `key`; an absent value is an empty list.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<Vec<Asset>, CoreError> {
        match store.get(key)? {
            Some(data) => Self::load_from_str(&data),
            None => Ok(Vec::new()),
        }
    }
}
