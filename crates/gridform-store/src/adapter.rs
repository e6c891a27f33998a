//! Loading and saving the cell store

use std::sync::Arc;

use gridform_core::{CellStore, Error as CoreError};

use crate::error::{StoreError, StoreResult};
use crate::KeyValueStore;

/// Fixed slot name the grid is saved under
pub const STORAGE_KEY: &str = "inputValues";

/// Serialize a store as a JSON array of strings
pub fn encode(store: &CellStore) -> StoreResult<String> {
    Ok(serde_json::to_string(store.values())?)
}

/// Decode a stored record into a store
///
/// The record must be a JSON array with exactly one entry per cell. Entries
/// may be strings or `null` (read as an empty cell); any other JSON value is
/// rejected.
pub fn decode(text: &str) -> StoreResult<CellStore> {
    let entries: Vec<Option<String>> = serde_json::from_str(text)?;
    let values = entries.into_iter().map(Option::unwrap_or_default).collect();
    CellStore::from_values(values).map_err(|e| match e {
        CoreError::LengthMismatch { expected, actual } => StoreError::Corrupt(format!(
            "expected {} cells, found {}",
            expected, actual
        )),
        other => StoreError::Corrupt(other.to_string()),
    })
}

/// Loads and saves the grid in a single durable slot
///
/// Cheap to clone; clones share the backing store.
#[derive(Clone)]
pub struct PersistenceAdapter {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistenceAdapter {
    /// Create an adapter saving under [`STORAGE_KEY`]
    pub fn new<S: KeyValueStore + 'static>(backend: S) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Create an adapter over an already shared backend
    pub fn from_shared(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Use a different slot name
    pub fn with_key<K: Into<String>>(mut self, key: K) -> Self {
        self.key = key.into();
        self
    }

    /// Slot name in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the saved grid
    ///
    /// Returns `None` when nothing is saved or the record cannot be read.
    /// Failures are logged, never returned.
    pub fn load(&self) -> Option<CellStore> {
        match self.try_load() {
            Ok(Some(store)) => {
                log::debug!(
                    "Loaded grid from '{}' ({} filled cells)",
                    self.key,
                    store.filled_count()
                );
                Some(store)
            }
            Ok(None) => {
                log::debug!("No saved grid under '{}'", self.key);
                None
            }
            Err(e) => {
                log::warn!("Error retrieving saved grid: {}", e);
                None
            }
        }
    }

    /// Load the saved grid, reporting why it could not be read
    pub fn try_load(&self) -> StoreResult<Option<CellStore>> {
        match self.backend.get_item(&self.key)? {
            Some(text) => decode(&text).map(Some),
            None => Ok(None),
        }
    }

    /// Save the grid, overwriting the slot
    ///
    /// Failures are logged and swallowed; the in-memory store stays the
    /// source of truth.
    pub fn save(&self, store: &CellStore) {
        match self.try_save(store) {
            Ok(()) => log::debug!("Saved grid to '{}'", self.key),
            Err(e) => log::warn!("Error saving grid: {}", e),
        }
    }

    /// Save the grid, returning any failure
    pub fn try_save(&self, store: &CellStore) -> StoreResult<()> {
        let text = encode(store)?;
        self.backend.set_item(&self.key, &text)
    }

    /// Remove the saved grid
    pub fn clear(&self) -> StoreResult<()> {
        self.backend.remove_item(&self.key)
    }
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
