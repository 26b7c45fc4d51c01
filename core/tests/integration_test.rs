//! Integration tests for MealMingle
//!
//! These tests verify end-to-end functionality including:
//! - Recipe CRUD through the service on real on-disk stores
//! - Persistence across restarts
//! - Application initialization from settings

use mealmingle::app::AppState;
use mealmingle::database::{CorruptDataPolicy, Difficulty, RecipeInput, RecipeRepository};
use mealmingle::error::ErrorKind;
use mealmingle::services::RecipesService;
use mealmingle::storage::{FileKvStore, KeyValueStore, SqliteKvStore};
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to create a service on a SQLite file
async fn create_sqlite_service() -> (RecipesService, Arc<SqliteKvStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteKvStore::open(&temp_dir.path().join("test.db")).await.unwrap());
    let service = RecipesService::new(RecipeRepository::new(store.clone()));

    (service, store, temp_dir)
}

/// Helper to create a service on the file-per-key store
async fn create_file_service(temp_dir: &TempDir) -> RecipesService {
    let store = FileKvStore::new(temp_dir.path().join("kv"));
    store.initialize().await.unwrap();
    RecipesService::new(RecipeRepository::new(Arc::new(store)))
}

fn pancakes() -> RecipeInput {
    RecipeInput {
        title: "Pancakes".to_string(),
        ingredients: "1. Flour\n\n  2.  Sugar  \nEggs".to_string(),
        instructions: "1. Whisk\n2. Fry".to_string(),
        image: Some("file:///data/user/0/images/pancakes.jpg".to_string()),
        time_to_cook: "15".to_string(),
        difficulty_level: "easy".to_string(),
    }
}

#[tokio::test]
async fn test_recipe_crud_operations() {
    let (service, _store, _temp) = create_sqlite_service().await;

    // Create recipe
    let recipe = service.add_recipe(pancakes()).await.unwrap();
    assert_eq!(recipe.title, "Pancakes");
    assert_eq!(recipe.ingredients, vec!["Flour", "Sugar", "Eggs"]);
    assert!(!recipe.id.is_empty());

    // Read recipe
    let retrieved = service.get_recipe(&recipe.id).await.unwrap();
    assert_eq!(retrieved, recipe);

    // Update recipe
    let updated = service
        .edit_recipe(
            &recipe.id,
            RecipeInput {
                title: "Banana pancakes".to_string(),
                difficulty_level: "MEDIUM".to_string(),
                ..pancakes()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, recipe.id);
    assert_eq!(updated.difficulty_level, Difficulty::Medium);

    // List recipes
    let recipes = service.list_recipes().await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "Banana pancakes");

    // Delete recipe, twice
    service.delete_recipe(&recipe.id).await.unwrap();
    service.delete_recipe(&recipe.id).await.unwrap();

    let recipes = service.list_recipes().await.unwrap();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_stored_layout_uses_recipes_key() {
    let (service, store, _temp) = create_sqlite_service().await;

    service.add_recipe(pancakes()).await.unwrap();

    let raw = store.get_item("recipes").await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];

    let mut keys: Vec<&str> = first.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "difficultyLevel",
            "id",
            "image",
            "ingredients",
            "instructions",
            "timeToCook",
            "title"
        ]
    );
    assert_eq!(first["timeToCook"], 15);
}

#[tokio::test]
async fn test_file_store_persists_across_restarts() {
    let temp_dir = TempDir::new().unwrap();

    let created = {
        let service = create_file_service(&temp_dir).await;
        service.add_recipe(pancakes()).await.unwrap()
    };

    let service = create_file_service(&temp_dir).await;
    let recipes = service.list_recipes().await.unwrap();
    assert_eq!(recipes, vec![created]);
}

#[tokio::test]
async fn test_reads_collection_written_by_older_app_version() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileKvStore::new(temp_dir.path().join("kv"));
    store.initialize().await.unwrap();

    // Created with a string cook time, then edited with a numeric one
    store
        .set_item(
            "recipes",
            r#"[
                {"id":"1","title":"Dal","ingredients":["Lentils"],"instructions":["Simmer"],
                 "difficultyLevel":"easy","timeToCook":"40","image":null},
                {"id":"2","title":"Naan","difficultyLevel":"hard","ingredients":["Flour"],
                 "instructions":["Knead","Bake"],"image":"file:///naan.jpg","timeToCook":25}
            ]"#,
        )
        .await
        .unwrap();

    let service = RecipesService::new(RecipeRepository::new(Arc::new(store)));
    let recipes = service.list_recipes().await.unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].time_to_cook, 40);
    assert_eq!(recipes[1].time_to_cook, 25);
    assert_eq!(recipes[1].image.as_deref(), Some("file:///naan.jpg"));
}

#[tokio::test]
async fn test_cleared_edit_time_and_timestamps_survive_round_trip() {
    let (service, store, _temp) = create_sqlite_service().await;

    // Saved by the old edit screen with the cook time cleared
    store
        .set_item(
            "recipes",
            r#"[{"id":"1","title":"Dal","ingredients":["Lentils"],"instructions":["Simmer"],
                 "image":null,"timeToCook":null,"difficultyLevel":"easy",
                 "created_at":"2024-05-01T10:00:00.000Z"},
                {"id":"2","title":"Naan","ingredients":["Flour"],"instructions":["Bake"],
                 "image":null,"timeToCook":25,"difficultyLevel":"hard"}]"#,
        )
        .await
        .unwrap();

    let recipes = service.list_recipes().await.unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].time_to_cook, 0);

    service.delete_recipe("2").await.unwrap();

    let raw = store.get_item("recipes").await.unwrap().unwrap();
    assert!(raw.contains(r#""created_at":"2024-05-01T10:00:00.000Z""#));

    service.clear_recipes().await.unwrap();
    assert_eq!(store.get_item("recipes").await.unwrap(), None);
    assert!(service.list_recipes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_draft_leaves_store_untouched() {
    let (service, store, _temp) = create_sqlite_service().await;
    service.add_recipe(pancakes()).await.unwrap();
    let before = store.get_item("recipes").await.unwrap();

    let err = service
        .add_recipe(RecipeInput {
            time_to_cook: String::new(),
            ..pancakes()
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("timeToCook"));
    assert_eq!(store.get_item("recipes").await.unwrap(), before);
}

#[tokio::test]
async fn test_app_state_initializes_from_settings() {
    let temp_dir = TempDir::new().unwrap();
    let app_data_dir = temp_dir.path().join("app");

    let state = AppState::initialize(app_data_dir.clone()).await.unwrap();
    assert!(app_data_dir.join("settings.json").exists());
    assert!(app_data_dir.join("mealmingle.db").exists());

    let recipe = state.recipes_service.add_recipe(pancakes()).await.unwrap();
    drop(state);

    let state = AppState::initialize(app_data_dir).await.unwrap();
    assert_eq!(state.recipes_service.list_recipes().await.unwrap(), vec![recipe]);
}

#[tokio::test]
async fn test_app_state_honors_file_backend_and_recovery() {
    let temp_dir = TempDir::new().unwrap();
    let app_data_dir = temp_dir.path().to_path_buf();
    std::fs::write(
        app_data_dir.join("settings.json"),
        r#"{"storage":{"backend":"file"},"recovery":{"on_corrupt_data":"treat_as_empty"}}"#,
    )
    .unwrap();
    std::fs::create_dir_all(app_data_dir.join("kv")).unwrap();
    std::fs::write(app_data_dir.join("kv").join("recipes"), "not json").unwrap();

    let state = AppState::initialize(app_data_dir.clone()).await.unwrap();
    assert_eq!(
        state.settings.recovery.on_corrupt_data,
        CorruptDataPolicy::TreatAsEmpty
    );

    assert!(state.recipes_service.list_recipes().await.unwrap().is_empty());
    state.recipes_service.add_recipe(pancakes()).await.unwrap();

    let preserved = std::fs::read_to_string(app_data_dir.join("kv").join("recipes.corrupt")).unwrap();
    assert_eq!(preserved, "not json");
    assert_eq!(state.recipes_service.list_recipes().await.unwrap().len(), 1);
}
