//! Database module
//!
//! This module provides the recipe data layer:
//! - SQLite pool and schema for the key-value table
//! - Recipe models and input cleaning
//! - Repository over the stored recipe collection

pub mod cleaning;
pub mod models;
pub mod repository;
pub mod schema;

pub use models::*;
pub use repository::{CorruptDataPolicy, RecipeRepository};
pub use schema::initialize_database;

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Open the database file at `db_path`, creating it if needed, and bring the
/// `kv_store` schema up to date.
pub async fn create_pool(db_path: &Path) -> Result<SqlitePool> {
    tracing::info!("Opening recipe database at: {:?}", db_path);

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal);

    // Writes are serialized by the repository above this pool
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    initialize_database(&pool).await?;

    Ok(pool)
}
