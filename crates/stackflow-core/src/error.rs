//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid environment '{0}' (expected 'dev' or 'prod')")]
    InvalidEnvironment(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Parameter file error: {0}")]
    ParameterFile(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
