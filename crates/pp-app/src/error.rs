//! Error types for the pp-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Preset error: {0}")]
    Preset(String),

    #[error("Structural mismatch: {0}")]
    Structure(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Unsupported data file: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Input closed before the session finished")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pp-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pp_preset::PresetError> for AppError {
    fn from(err: pp_preset::PresetError) -> Self {
        match err {
            pp_preset::PresetError::Structure(inner) => AppError::Structure(inner.to_string()),
            other => AppError::Preset(other.to_string()),
        }
    }
}

impl From<pp_data::DataError> for AppError {
    fn from(err: pp_data::DataError) -> Self {
        match err {
            pp_data::DataError::UnsupportedFormat { path } => AppError::UnsupportedFormat { path },
            other => AppError::Data(other.to_string()),
        }
    }
}

impl From<pp_render::RenderError> for AppError {
    fn from(err: pp_render::RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}
