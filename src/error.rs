//! Error types for the zen-zone service

use std::io;

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, ZenError>;

/// Errors raised by the catalog loader and the shared application state
#[derive(Debug, thiserror::Error)]
pub enum ZenError {
    /// Breathing exercise index outside the catalog
    #[error("Unknown breathing exercise: {0}")]
    UnknownExercise(usize),

    /// Meditation program index outside the catalog
    #[error("Unknown meditation program: {0}")]
    UnknownProgram(usize),

    /// Posture index outside the catalog
    #[error("Unknown posture: {0}")]
    UnknownPosture(usize),

    /// Catalog file could not be read
    #[error("Catalog IO error: {0}")]
    Io(#[from] io::Error),

    /// Catalog file is not valid JSON for the catalog schema
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog content failed validation
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// A state mutex was poisoned by a panicking holder
    #[error("Failed to lock {0}")]
    Lock(String),
}

impl ZenError {
    /// Whether the error comes from a caller naming a catalog entry that does not exist
    pub fn is_unknown_index(&self) -> bool {
        matches!(
            self,
            ZenError::UnknownExercise(_) | ZenError::UnknownProgram(_) | ZenError::UnknownPosture(_)
        )
    }
}
