//! AllerLens Error Types
//!
//! Centralized error handling for the scanning service and its adapters.
//! Per-image OCR failures have their own type, [`crate::ocr::ExtractError`].

use thiserror::Error;

/// Central error type for AllerLens
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("No frames provided")]
    NoFrames,

    #[error("Missing ingredient")]
    MissingIngredient,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error("Ingredient store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for AllerLens operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for ScanError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ScanError::Lock(err.to_string())
    }
}
