//! File-per-key storage
//!
//! Each key is stored as its own file under a root directory. Writes go to
//! a temporary sibling first and are renamed into place, so a reader sees
//! either the old value or the new one.
//!
//! Example: key "recipes" is stored at "<root>/recipes"

use super::KeyValueStore;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Key-value store backed by plain files
#[derive(Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Create a new store at the given root directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Initialize the store (create directory if needed)
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("File store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Get file path for a key
    fn get_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));

        if !valid {
            return Err(AppError::Storage(format!("Invalid storage key: {:?}", key)));
        }

        Ok(self.root.join(key))
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.get_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(value) => {
                tracing::debug!("Read key: {} ({} bytes)", key, value.len());
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.get_path(key)?;

        // Write to temp file first (atomic write)
        let temp_path = self.root.join(format!(".{}.tmp", key));
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;

        // Rename to final location
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Wrote key: {} ({} bytes)", key, value.len());

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.get_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Removed key: {}", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
