//! Error types for the tcc-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the engine crates
/// and gives CLI and GUI a single error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Study error: {0}")]
    Study(String),

    #[error("Failed to read study file: {path}")]
    StudyFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write study file: {path}")]
    StudyFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Study validation failed: {0}")]
    Validation(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Curve error: {0}")]
    Curve(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tcc-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<tcc_core::TccError> for AppError {
    fn from(err: tcc_core::TccError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<tcc_study::StudyError> for AppError {
    fn from(err: tcc_study::StudyError) -> Self {
        match err {
            tcc_study::StudyError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Study(other.to_string()),
        }
    }
}

impl From<tcc_study::ValidationError> for AppError {
    fn from(err: tcc_study::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<tcc_curves::CurveError> for AppError {
    fn from(err: tcc_curves::CurveError) -> Self {
        AppError::Curve(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Study(format!("JSON serialization failed: {err}"))
    }
}
