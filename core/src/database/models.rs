//! Recipe models
//!
//! Rust structs for the persisted recipe records and the drafts that
//! produce them. Field names on the wire match the stored collection
//! (`timeToCook`, `difficultyLevel`) so existing data stays readable.

use super::cleaning::{clean_lines, digits_only, join_lines};
use crate::config::MAX_TIME_TO_COOK_MINUTES;
use crate::error::{AppError, Result, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A persisted recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Local image URI from the picker, stored verbatim
    #[serde(default)]
    pub image: Option<String>,
    /// Cook time in minutes. Older records stored this as a numeric string,
    /// or as `null` when the edit form was saved with the field cleared.
    #[serde(rename = "timeToCook", default, deserialize_with = "deserialize_minutes")]
    pub time_to_cook: u32,
    #[serde(rename = "difficultyLevel", default)]
    pub difficulty_level: Difficulty,
    /// Opaque timestamp from older app versions, written back untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
}

impl Recipe {
    /// Serialize for handing to the detail and edit views
    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a payload received from navigation
    pub fn from_payload(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| AppError::InvalidPayload(e.to_string()))
    }

    /// Cook time label shown on recipe cards, e.g. "45 min"
    pub fn time_label(&self) -> String {
        format!("{} min", self.time_to_cook)
    }
}

/// Recipe difficulty, stored lowercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Uppercase badge text shown next to the title
    pub fn badge(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty level: {}", other)),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accept `timeToCook` as a number or a numeric string.
///
/// Anything else (`null`, `""`, non-numeric text) reads as 0 so one bad
/// record does not make the whole collection unreadable.
fn deserialize_minutes<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    let minutes = match &value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    Ok(minutes.unwrap_or_else(|| {
        tracing::warn!("Unreadable timeToCook {}, reading as 0", value);
        0
    }))
}

/// Draft fields that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeField {
    Title,
    Ingredients,
    Instructions,
    TimeToCook,
    DifficultyLevel,
}

impl RecipeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeField::Title => "title",
            RecipeField::Ingredients => "ingredients",
            RecipeField::Instructions => "instructions",
            RecipeField::TimeToCook => "timeToCook",
            RecipeField::DifficultyLevel => "difficultyLevel",
        }
    }
}

/// User-entered recipe data, as the add and edit forms hold it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeInput {
    pub title: String,
    /// One ingredient per line, numbering allowed
    pub ingredients: String,
    /// One step per line, numbering allowed
    pub instructions: String,
    pub image: Option<String>,
    /// Raw text of the numeric field; non-digits are ignored
    #[serde(rename = "timeToCook")]
    pub time_to_cook: String,
    #[serde(rename = "difficultyLevel")]
    pub difficulty_level: String,
}

impl Default for RecipeInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            image: None,
            time_to_cook: String::new(),
            difficulty_level: Difficulty::default().as_str().to_string(),
        }
    }
}

impl RecipeInput {
    /// Pre-fill the edit form from a stored recipe
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: join_lines(&recipe.ingredients),
            instructions: join_lines(&recipe.instructions),
            image: recipe.image.clone(),
            time_to_cook: recipe.time_to_cook.to_string(),
            difficulty_level: recipe.difficulty_level.as_str().to_string(),
        }
    }

    /// Validate and clean the draft.
    ///
    /// Every failing field is reported at once so the form can flag them
    /// together.
    pub fn validate(&self) -> std::result::Result<RecipeFields, ValidationError> {
        let mut errors = ValidationError::default();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            errors.missing.push(RecipeField::Title);
        }

        let ingredients = clean_lines(&self.ingredients);
        if ingredients.is_empty() {
            errors.missing.push(RecipeField::Ingredients);
        }

        let instructions = clean_lines(&self.instructions);
        if instructions.is_empty() {
            errors.missing.push(RecipeField::Instructions);
        }

        let minutes = digits_only(&self.time_to_cook);
        let time_to_cook = if minutes.is_empty() {
            errors.missing.push(RecipeField::TimeToCook);
            None
        } else {
            match minutes.parse::<u32>() {
                Ok(n) if n <= MAX_TIME_TO_COOK_MINUTES => Some(n),
                _ => {
                    errors.invalid.push(RecipeField::TimeToCook);
                    None
                }
            }
        };

        let difficulty_level = if self.difficulty_level.trim().is_empty() {
            errors.missing.push(RecipeField::DifficultyLevel);
            None
        } else {
            match self.difficulty_level.parse::<Difficulty>() {
                Ok(level) => Some(level),
                Err(_) => {
                    errors.invalid.push(RecipeField::DifficultyLevel);
                    None
                }
            }
        };

        match (time_to_cook, difficulty_level) {
            (Some(time_to_cook), Some(difficulty_level)) if errors.is_empty() => Ok(RecipeFields {
                title,
                ingredients,
                instructions,
                image: self.image.clone().filter(|uri| !uri.trim().is_empty()),
                time_to_cook,
                difficulty_level,
            }),
            _ => Err(errors),
        }
    }
}

/// A validated, cleaned draft ready to be stored under an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image: Option<String>,
    pub time_to_cook: u32,
    pub difficulty_level: Difficulty,
}

impl RecipeFields {
    pub fn into_recipe(self, id: String) -> Recipe {
        Recipe {
            id,
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            image: self.image,
            time_to_cook: self.time_to_cook,
            difficulty_level: self.difficulty_level,
            created_at: None,
        }
    }
}
