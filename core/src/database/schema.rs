//! Database schema
//!
//! The database holds a single key-value table. The schema version is kept
//! in SQLite's `user_version` header field and bumped in the same
//! transaction as the statement that creates the table.

use crate::error::Result;
use sqlx::sqlite::SqlitePool;

/// Schema steps, applied in order. Step `n` moves `user_version` to `n + 1`.
const SCHEMA_STEPS: &[&str] = &[include_str!("migrations/001_initial_schema.sql")];

/// Create the `kv_store` table if this database has not got it yet
pub async fn initialize_database(pool: &SqlitePool) -> Result<()> {
    let current: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;

    for (step, sql) in SCHEMA_STEPS.iter().enumerate() {
        let version = step as i64 + 1;
        if version <= current {
            continue;
        }

        let mut tx = pool.begin().await?;
        sqlx::query(sql).execute(&mut *tx).await?;
        // PRAGMA takes no bound parameters
        sqlx::query(&format!("PRAGMA user_version = {}", version))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!("Database schema now at version {}", version);
    }

    Ok(())
}
