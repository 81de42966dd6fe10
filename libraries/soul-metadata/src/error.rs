/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Stream header carries no bit rate
    #[error("No bit rate in stream header: {0}")]
    NoBitrate(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MetadataError> for soul_core::SoulError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::NoBitrate(_) => soul_core::SoulError::probe(err.to_string()),
            MetadataError::Io(e) => soul_core::SoulError::Io(e),
            other => soul_core::SoulError::metadata(other.to_string()),
        }
    }
}
