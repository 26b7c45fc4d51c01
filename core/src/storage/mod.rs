//! Storage module
//!
//! Key-value persistence behind the recipe repository. Every backend stores
//! a whole value under one key and replaces it atomically on write.

pub mod file_store;
pub mod memory_store;
pub mod sqlite_store;

pub use file_store::FileKvStore;
pub use memory_store::MemoryKvStore;
pub use sqlite_store::SqliteKvStore;

use crate::error::Result;
use async_trait::async_trait;

/// Persistent string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// Implementations must make the replacement atomic: a failed write
    /// leaves the previous value in place.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing a key that is not present is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;
}
