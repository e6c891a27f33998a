//! # gridform-store
//!
//! Persistence for the gridform cell store.
//!
//! The grid is saved as a JSON array of strings under one fixed key in a
//! durable key-value slot. Stored records are treated as plain data: decoding
//! accepts only strings (or `null`, read as empty) and never evaluates
//! anything it finds.

mod adapter;
mod error;
mod file;
mod memory;

pub use adapter::{decode, encode, PersistenceAdapter, STORAGE_KEY};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// A durable key-value slot store
///
/// Implementations must be safe to share across threads; saves run as
/// background tasks and may overlap.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if nothing is stored
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any prior value
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove the value under `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}
