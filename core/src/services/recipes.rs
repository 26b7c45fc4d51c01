//! Recipes service
//!
//! High-level operations the list, detail, add and edit screens call.
//! Screens never touch storage directly; they go through this service and
//! re-render from `list_recipes` afterwards.

use crate::database::{Recipe, RecipeInput, RecipeRepository};
use crate::error::Result;

/// Service for managing recipes
#[derive(Clone)]
pub struct RecipesService {
    repo: RecipeRepository,
}

impl RecipesService {
    pub fn new(repo: RecipeRepository) -> Self {
        Self { repo }
    }

    /// Add a recipe from the create form
    pub async fn add_recipe(&self, input: RecipeInput) -> Result<Recipe> {
        tracing::info!("Adding recipe: {}", input.title.trim());

        let recipe = self.repo.create(&input).await?;

        tracing::info!("Recipe added successfully: {}", recipe.id);

        Ok(recipe)
    }

    /// Get a recipe by ID
    pub async fn get_recipe(&self, id: &str) -> Result<Recipe> {
        self.repo.get(id).await
    }

    /// List all recipes in the order they were added
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.repo.list().await
    }

    /// Save the edit form. A recipe that no longer exists is re-added.
    pub async fn edit_recipe(&self, id: &str, input: RecipeInput) -> Result<Recipe> {
        tracing::debug!("Updating recipe: {}", id);

        let recipe = self.repo.update_or_insert(id, &input).await?;

        tracing::info!("Recipe updated successfully: {}", recipe.id);

        Ok(recipe)
    }

    /// Save the edit form, failing if the recipe no longer exists
    pub async fn edit_recipe_strict(&self, id: &str, input: RecipeInput) -> Result<Recipe> {
        tracing::debug!("Updating existing recipe: {}", id);

        let recipe = self.repo.update_strict(id, &input).await?;

        tracing::info!("Recipe updated successfully: {}", recipe.id);

        Ok(recipe)
    }

    /// Delete a recipe
    pub async fn delete_recipe(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting recipe: {}", id);

        self.repo.delete(id).await?;

        tracing::info!("Recipe deleted successfully: {}", id);

        Ok(())
    }

    /// Remove every stored recipe
    pub async fn clear_recipes(&self) -> Result<()> {
        tracing::info!("Clearing all recipes");

        self.repo.clear().await?;

        tracing::info!("Recipes cleared");

        Ok(())
    }

    /// Decode a navigation payload and pre-fill the edit form from it
    pub fn edit_form_for(payload: &str) -> Result<(Recipe, RecipeInput)> {
        let recipe = Recipe::from_payload(payload)?;
        let form = RecipeInput::from_recipe(&recipe);
        Ok((recipe, form))
    }
}
