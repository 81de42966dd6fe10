/// Metadata reader implementation using lofty
use crate::error::MetadataError;
use lofty::{AudioFile, ItemKey, TagType, TaggedFileExt};
use soul_core::{DialectTags, MetadataReader, NormalizedTags, SoulError, TagDialect};
use std::path::Path;
use std::time::Duration;

/// Metadata reader using the lofty library
///
/// Every tag lofty finds in the file is mapped to the dialect of its
/// container, so a FLAC with stray ID3 frames keeps both sets apart.
pub struct LoftyMetadataReader;

impl LoftyMetadataReader {
    /// Create a new metadata reader
    pub fn new() -> Self {
        Self
    }

    /// Extract the dialect-independent fields from a lofty tag
    fn extract_from_tag(tag: &lofty::Tag) -> DialectTags {
        let text = |key: &ItemKey| {
            tag.get_string(key)
                .map(|s| s.trim_end_matches('\0').to_string())
        };

        DialectTags {
            title: text(&ItemKey::TrackTitle),
            artist: text(&ItemKey::TrackArtist),
            album_artist: text(&ItemKey::AlbumArtist),
            album: text(&ItemKey::AlbumTitle),
        }
    }
}

/// Dialect a lofty tag type belongs to
pub fn dialect_of(tag_type: TagType) -> TagDialect {
    match tag_type {
        TagType::Id3v2 | TagType::Id3v1 => TagDialect::Id3,
        TagType::VorbisComments => TagDialect::Vorbis,
        TagType::Mp4Ilst => TagDialect::Itunes,
        _ => TagDialect::Generic,
    }
}

// ID3v2 is read before ID3v1 so the richer tag wins per field.
fn read_order(tag_type: TagType) -> u8 {
    match tag_type {
        TagType::Id3v2 => 0,
        TagType::Id3v1 => 2,
        _ => 1,
    }
}

impl Default for LoftyMetadataReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataReader for LoftyMetadataReader {
    fn read(&self, path: &Path) -> soul_core::Result<NormalizedTags> {
        // Check if file exists
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()).into());
        }
        if !path.is_file() {
            return Err(SoulError::invalid_input(format!("{} is not a file", path.display())));
        }

        // Probe and read the file
        let tagged_file = lofty::read_from_path(path).map_err(MetadataError::from)?;

        let mut metadata = NormalizedTags::new();

        let duration = tagged_file.properties().duration();
        if duration > Duration::ZERO {
            metadata.duration = Some(duration);
        }

        let mut tags: Vec<&lofty::Tag> = tagged_file.tags().iter().collect();
        tags.sort_by_key(|tag| read_order(tag.tag_type()));

        for tag in tags {
            let fields = Self::extract_from_tag(tag);
            metadata
                .dialect_mut(dialect_of(tag.tag_type()))
                .merge_missing(fields);
        }

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_creation() {
        let reader = LoftyMetadataReader::new();
        // Just verify it compiles and constructs
        drop(reader);
    }

    #[test]
    fn read_nonexistent_file_returns_error() {
        let reader = LoftyMetadataReader::new();
        let result = reader.read(Path::new("/nonexistent/file.mp3"));
        assert!(result.is_err());
    }

    #[test]
    fn read_directory_is_invalid_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = LoftyMetadataReader::new().read(dir.path()).unwrap_err();
        assert!(matches!(err, SoulError::InvalidInput(_)));
    }

    #[test]
    fn tag_types_map_to_dialects() {
        assert_eq!(dialect_of(TagType::Id3v2), TagDialect::Id3);
        assert_eq!(dialect_of(TagType::Id3v1), TagDialect::Id3);
        assert_eq!(dialect_of(TagType::VorbisComments), TagDialect::Vorbis);
        assert_eq!(dialect_of(TagType::Mp4Ilst), TagDialect::Itunes);
        assert_eq!(dialect_of(TagType::Ape), TagDialect::Generic);
        assert_eq!(dialect_of(TagType::RiffInfo), TagDialect::Generic);
    }

    #[test]
    fn id3v2_read_before_id3v1() {
        assert!(read_order(TagType::Id3v2) < read_order(TagType::Id3v1));
        assert!(read_order(TagType::Ape) < read_order(TagType::Id3v1));
    }
}
