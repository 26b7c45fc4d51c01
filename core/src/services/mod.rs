//! Services module
//!
//! Business logic services that sit between the screens and the repository.

pub mod recipes;
pub mod settings;

pub use recipes::RecipesService;
pub use settings::{AppSettings, SettingsService, StorageBackend};
