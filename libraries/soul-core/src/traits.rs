/// Core traits for Soul Player
use crate::error::Result;
use crate::types::NormalizedTags;
use std::path::Path;

/// Metadata reader trait
///
/// Implementers extract tags from audio files and file each value under
/// the dialect it was read from.
pub trait MetadataReader {
    /// Read tags from an audio file
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or parsed
    fn read(&self, path: &Path) -> Result<NormalizedTags>;
}

/// Bit rate probe trait
///
/// Implementers estimate the encoding bit rate of an audio stream from its
/// header. The value is a quality heuristic, never an identity signal.
pub trait BitrateProbe {
    /// Estimated bit rate in kbps
    ///
    /// # Errors
    /// Returns an error if the stream header cannot be read or carries no
    /// usable bit rate
    fn probe(&self, path: &Path) -> Result<u32>;
}
