//! In-memory storage
//!
//! Nothing survives the process. Used for tests and for sessions that
//! should not touch the disk.

use super::KeyValueStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryKvStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        tracing::debug!("Set key: {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().await.remove(key);
        tracing::debug!("Removed key: {}", key);
        Ok(())
    }
}
