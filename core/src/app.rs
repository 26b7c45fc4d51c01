//! Application state and initialization
//!
//! This module wires settings, storage and services together.
//! The host app calls `AppState::initialize` once on startup and hands the
//! resulting state to its screens.

use crate::database::RecipeRepository;
use crate::error::Result;
use crate::logging;
use crate::services::{AppSettings, RecipesService, SettingsService, StorageBackend};
use crate::storage::{FileKvStore, KeyValueStore, MemoryKvStore, SqliteKvStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub app_data_dir: PathBuf,
    pub settings: AppSettings,
    pub recipes_service: RecipesService,
}

impl AppState {
    /// Application setup - called once on startup
    pub async fn initialize(app_data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&app_data_dir)?;

        let settings = SettingsService::new(app_data_dir.clone()).load().await?;
        logging::init(&settings.logging.filter);

        tracing::info!("Initializing application");
        tracing::info!("App data directory: {:?}", app_data_dir);

        let store = open_store(&app_data_dir, &settings).await?;
        let repo = RecipeRepository::new(store)
            .with_corrupt_data_policy(settings.recovery.on_corrupt_data);
        let recipes_service = RecipesService::new(repo);

        tracing::info!("Application initialized successfully");

        Ok(Self {
            app_data_dir,
            settings,
            recipes_service,
        })
    }
}

async fn open_store(app_data_dir: &Path, settings: &AppSettings) -> Result<Arc<dyn KeyValueStore>> {
    let storage = &settings.storage;

    let store: Arc<dyn KeyValueStore> = match storage.backend {
        StorageBackend::Sqlite => {
            Arc::new(SqliteKvStore::open(&app_data_dir.join(&storage.database_file)).await?)
        }
        StorageBackend::File => {
            let store = FileKvStore::new(app_data_dir.join(&storage.kv_dir));
            store.initialize().await?;
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, recipes will not be persisted");
            Arc::new(MemoryKvStore::new())
        }
    };

    tracing::info!("Recipe storage backend: {:?}", storage.backend);

    Ok(store)
}
