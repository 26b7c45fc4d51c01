//! Application configuration constants
//!
//! Central location for storage keys, file names, and validation
//! boundaries used throughout the crate.

// ===== Storage Layout =====

/// Key under which the whole recipe collection is stored
pub const RECIPES_STORAGE_KEY: &str = "recipes";

/// Key that receives an unreadable collection before it is overwritten
pub const CORRUPT_RECIPES_STORAGE_KEY: &str = "recipes.corrupt";

/// Default SQLite database file name inside the app data directory
pub const DEFAULT_DATABASE_FILE: &str = "mealmingle.db";

/// Default directory for the file-per-key store inside the app data directory
pub const DEFAULT_KV_DIR: &str = "kv";

/// Settings file name inside the app data directory
pub const SETTINGS_FILE: &str = "settings.json";

// ===== Logging =====

/// Filter used when neither `RUST_LOG` nor settings provide one
pub const DEFAULT_LOG_FILTER: &str = "mealmingle=debug,info";

// ===== Recipe Limits =====

/// Maximum accepted cook time in minutes (one week).
/// Larger values are almost certainly typos in the numeric field.
pub const MAX_TIME_TO_COOK_MINUTES: u32 = 7 * 24 * 60;

/// Number of identifiers generated before giving up on a collision
pub const MAX_ID_ATTEMPTS: usize = 5;
