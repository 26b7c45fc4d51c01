//! Error types for MealMingle
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized to the UI layer as plain messages.

use crate::database::RecipeField;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Stored recipes are corrupted: {0}")]
    CorruptData(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Recipe id already in use: {0}")]
    DuplicateId(String),

    #[error("Failed to load recipe data: {0}")]
    InvalidPayload(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Generic(String),
}

/// Coarse classification used by callers to pick a message or recovery path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Parse,
    Storage,
    NotFound,
    Conflict,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::CorruptData(_) | AppError::InvalidPayload(_) => ErrorKind::Parse,
            AppError::RecipeNotFound(_) => ErrorKind::NotFound,
            AppError::DuplicateId(_) => ErrorKind::Conflict,
            AppError::Database(_)
            | AppError::Io(_)
            | AppError::Serialization(_)
            | AppError::Storage(_)
            | AppError::Generic(_) => ErrorKind::Storage,
        }
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Fields that failed draft validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Required fields that were absent or empty
    pub missing: Vec<RecipeField>,
    /// Fields that were present but could not be accepted
    pub invalid: Vec<RecipeField>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |fields: &[RecipeField]| {
            fields
                .iter()
                .map(|field| field.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        if !self.missing.is_empty() {
            write!(f, "Please fill in all required fields: {}", join(&self.missing))?;
        }
        if !self.invalid.is_empty() {
            if !self.missing.is_empty() {
                f.write_str("; ")?;
            }
            write!(f, "Invalid values for: {}", join(&self.invalid))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

pub type Result<T> = std::result::Result<T, AppError>;
