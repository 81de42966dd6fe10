//! Metadata extraction from audio files

use soul_core::{MetadataReader, NormalizedTags};
use std::path::Path;
use tracing::{debug, warn};

/// Extract tags from an audio file, never failing
///
/// A file whose tags cannot be read is treated as untagged: placement then
/// falls back to names derived from the file name.
pub fn extract_tags(reader: &dyn MetadataReader, path: &Path) -> NormalizedTags {
    match reader.read(path) {
        Ok(tags) => {
            debug!("{}: {:?}", path.display(), tags);
            tags
        }
        Err(e) => {
            warn!(
                "Failed to read tags from {}: {}; using file name",
                path.display(),
                e
            );
            NormalizedTags::new()
        }
    }
}
