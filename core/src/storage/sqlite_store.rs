//! SQLite-backed key-value storage
//!
//! Values live in the `kv_store` table. A write is a single-row upsert, so
//! it either commits entirely or leaves the previous value untouched.

use super::KeyValueStore;
use crate::database::create_pool;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::path::Path;

#[derive(Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    /// Wrap a pool whose schema is already initialized
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (and migrate) the database file at `db_path`
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = create_pool(db_path).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Set key: {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Removed key: {} ({} rows)", key, result.rows_affected());
        Ok(())
    }
}
