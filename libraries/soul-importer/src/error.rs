//! Error types for the importer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] soul_core::SoulError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
