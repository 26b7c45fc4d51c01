//! Repository over the stored recipe collection
//!
//! The whole collection lives as one JSON array under a single key. Every
//! operation reads the full array, works on an in-memory copy, and writes
//! the full array back. The write is the last step of each mutation, so a
//! failed write leaves the stored collection as it was.
//!
//! Mutations through one repository (and its clones) are serialized by an
//! async mutex. Separate repositories over the same store are not
//! coordinated.

use super::models::{Recipe, RecipeInput};
use crate::config::{CORRUPT_RECIPES_STORAGE_KEY, MAX_ID_ATTEMPTS, RECIPES_STORAGE_KEY};
use crate::error::{AppError, Result};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// What to do when the stored collection cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptDataPolicy {
    /// Surface `AppError::CorruptData` to the caller
    #[default]
    Fail,
    /// Read as empty; the raw value is set aside before the next write
    TreatAsEmpty,
}

type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Collection as read from storage
struct Collection {
    recipes: Vec<Recipe>,
    /// Unparseable raw value that must be preserved before overwriting
    corrupt_raw: Option<String>,
}

/// Repository for recipe records
#[derive(Clone)]
pub struct RecipeRepository {
    store: Arc<dyn KeyValueStore>,
    on_corrupt_data: CorruptDataPolicy,
    id_generator: IdGenerator,
    write_lock: Arc<Mutex<()>>,
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            on_corrupt_data: CorruptDataPolicy::default(),
            id_generator: Arc::new(|| Uuid::new_v4().to_string()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_corrupt_data_policy(mut self, policy: CorruptDataPolicy) -> Self {
        self.on_corrupt_data = policy;
        self
    }

    /// Replace the identifier source used by `create`
    pub fn with_id_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.id_generator = Arc::new(generator);
        self
    }

    /// List all recipes in insertion order
    pub async fn list(&self) -> Result<Vec<Recipe>> {
        Ok(self.read_collection().await?.recipes)
    }

    /// Get a recipe by ID
    pub async fn get(&self, id: &str) -> Result<Recipe> {
        self.list()
            .await?
            .into_iter()
            .find(|recipe| recipe.id == id)
            .ok_or_else(|| AppError::RecipeNotFound(id.to_string()))
    }

    /// Create a new recipe under a freshly generated id
    pub async fn create(&self, draft: &RecipeInput) -> Result<Recipe> {
        let fields = draft.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut collection = self.read_collection().await?;

        let id = self.fresh_id(&collection.recipes)?;
        let recipe = fields.into_recipe(id);
        collection.recipes.push(recipe.clone());

        self.write_collection(&collection).await?;

        tracing::debug!("Created recipe: {}", recipe.id);
        Ok(recipe)
    }

    /// Replace the recipe with `id`, or append it if no such recipe exists
    pub async fn update(&self, id: &str, draft: &RecipeInput) -> Result<Recipe> {
        self.update_or_insert(id, draft).await
    }

    /// Replace the recipe with `id` in place, appending it when missing
    pub async fn update_or_insert(&self, id: &str, draft: &RecipeInput) -> Result<Recipe> {
        self.replace(id, draft, true).await
    }

    /// Replace the recipe with `id` in place, failing when it is missing
    pub async fn update_strict(&self, id: &str, draft: &RecipeInput) -> Result<Recipe> {
        self.replace(id, draft, false).await
    }

    /// Delete every recipe with `id`. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.read_collection().await?;

        let before = collection.recipes.len();
        collection.recipes.retain(|recipe| recipe.id != id);

        if collection.recipes.len() == before {
            tracing::debug!("Delete of unknown recipe ignored: {}", id);
            return Ok(());
        }

        self.write_collection(&collection).await?;

        tracing::debug!("Deleted recipe: {}", id);
        Ok(())
    }

    /// Remove the stored collection entirely. A preserved corrupt value is
    /// left alone.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.remove_item(RECIPES_STORAGE_KEY).await?;

        tracing::debug!("Cleared stored recipes");
        Ok(())
    }

    async fn replace(
        &self,
        id: &str,
        draft: &RecipeInput,
        insert_if_missing: bool,
    ) -> Result<Recipe> {
        let fields = draft.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut collection = self.read_collection().await?;

        let mut recipe = fields.into_recipe(id.to_string());

        match collection.recipes.iter().position(|existing| existing.id == id) {
            Some(index) => {
                recipe.created_at = collection.recipes[index].created_at.clone();
                collection.recipes[index] = recipe.clone();
                tracing::debug!("Updated recipe: {}", id);
            }
            None if insert_if_missing => {
                tracing::warn!("Recipe {} not found on update, inserting it", id);
                collection.recipes.push(recipe.clone());
            }
            None => return Err(AppError::RecipeNotFound(id.to_string())),
        }

        self.write_collection(&collection).await?;

        Ok(recipe)
    }

    fn fresh_id(&self, recipes: &[Recipe]) -> Result<String> {
        let mut last = String::new();

        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = (self.id_generator)();
            if !recipes.iter().any(|recipe| recipe.id == candidate) {
                return Ok(candidate);
            }
            tracing::warn!("Generated recipe id collides with an existing one: {}", candidate);
            last = candidate;
        }

        Err(AppError::DuplicateId(last))
    }

    async fn read_collection(&self) -> Result<Collection> {
        let Some(raw) = self.store.get_item(RECIPES_STORAGE_KEY).await? else {
            return Ok(Collection {
                recipes: Vec::new(),
                corrupt_raw: None,
            });
        };

        match serde_json::from_str::<Vec<Recipe>>(&raw) {
            Ok(recipes) => Ok(Collection {
                recipes,
                corrupt_raw: None,
            }),
            Err(e) => match self.on_corrupt_data {
                CorruptDataPolicy::Fail => Err(AppError::CorruptData(e.to_string())),
                CorruptDataPolicy::TreatAsEmpty => {
                    tracing::warn!("Stored recipes are unreadable, treating as empty: {}", e);
                    Ok(Collection {
                        recipes: Vec::new(),
                        corrupt_raw: Some(raw),
                    })
                }
            },
        }
    }

    async fn write_collection(&self, collection: &Collection) -> Result<()> {
        let value = serde_json::to_string(&collection.recipes)?;

        if let Some(raw) = &collection.corrupt_raw {
            self.store.set_item(CORRUPT_RECIPES_STORAGE_KEY, raw).await?;
            tracing::warn!(
                "Preserved unreadable recipes under '{}'",
                CORRUPT_RECIPES_STORAGE_KEY
            );
        }

        self.store.set_item(RECIPES_STORAGE_KEY, &value).await?;

        tracing::debug!("Stored {} recipes", collection.recipes.len());
        Ok(())
    }
}
