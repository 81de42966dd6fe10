//! Normalized tag record shared by the extractor and the importer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tag dialect a value was read from
///
/// Different container formats store the same logical field under
/// different keys (`TPE2` in ID3, `ALBUMARTIST` in Vorbis comments,
/// `aART` in an MP4 `ilst` atom). Adapters file every value under the
/// dialect it came from so lookups can follow a fixed fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagDialect {
    /// ID3v2 / ID3v1 frames (MP3, AIFF with ID3, WAV with ID3)
    Id3,
    /// Vorbis comments (FLAC, OGG, OPUS)
    Vorbis,
    /// iTunes-style MP4 atoms (M4A, MP4, AAC in MP4)
    Itunes,
    /// APE, RIFF INFO and AIFF text chunks
    Generic,
}

impl TagDialect {
    /// All dialects, in lookup priority order
    pub const ALL: [TagDialect; 4] = [Self::Id3, Self::Vorbis, Self::Itunes, Self::Generic];
}

/// The fields a single dialect can carry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectTags {
    /// Track title
    pub title: Option<String>,
    /// Track artist
    pub artist: Option<String>,
    /// Album artist (may differ from track artist)
    pub album_artist: Option<String>,
    /// Album title
    pub album: Option<String>,
}

impl DialectTags {
    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album_artist.is_none()
            && self.album.is_none()
    }

    /// Fill fields that are still unset from `other`
    ///
    /// Used when a file carries two tags of the same dialect (ID3v2 and
    /// ID3v1 on one MP3): the first tag read wins per field.
    pub fn merge_missing(&mut self, other: DialectTags) {
        if self.title.is_none() {
            self.title = other.title;
        }
        if self.artist.is_none() {
            self.artist = other.artist;
        }
        if self.album_artist.is_none() {
            self.album_artist = other.album_artist;
        }
        if self.album.is_none() {
            self.album = other.album;
        }
    }
}

/// Tag fields of one audio file, grouped by dialect
///
/// An empty record is a valid value: it is what extraction yields for
/// untagged or unreadable files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTags {
    /// ID3 frames
    pub id3: DialectTags,
    /// Vorbis comments
    pub vorbis: DialectTags,
    /// iTunes atoms
    pub itunes: DialectTags,
    /// APE / RIFF INFO / AIFF text
    pub generic: DialectTags,

    /// Playback duration, when the stream header could be read
    pub duration: Option<Duration>,
}

impl NormalizedTags {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields for one dialect
    pub fn dialect(&self, dialect: TagDialect) -> &DialectTags {
        match dialect {
            TagDialect::Id3 => &self.id3,
            TagDialect::Vorbis => &self.vorbis,
            TagDialect::Itunes => &self.itunes,
            TagDialect::Generic => &self.generic,
        }
    }

    /// Mutable fields for one dialect
    pub fn dialect_mut(&mut self, dialect: TagDialect) -> &mut DialectTags {
        match dialect {
            TagDialect::Id3 => &mut self.id3,
            TagDialect::Vorbis => &mut self.vorbis,
            TagDialect::Itunes => &mut self.itunes,
            TagDialect::Generic => &mut self.generic,
        }
    }

    /// Check if no dialect carries any field
    pub fn is_empty(&self) -> bool {
        TagDialect::ALL.iter().all(|d| self.dialect(*d).is_empty())
    }

    /// First non-blank title, in dialect priority order
    pub fn title(&self) -> Option<&str> {
        TagDialect::ALL
            .iter()
            .find_map(|d| non_blank(self.dialect(*d).title.as_deref()))
    }

    /// First non-blank album, in dialect priority order
    pub fn album(&self) -> Option<&str> {
        TagDialect::ALL
            .iter()
            .find_map(|d| non_blank(self.dialect(*d).album.as_deref()))
    }

    /// First non-blank artist
    ///
    /// Album artist is preferred over track artist so compilations stay
    /// together, except for iTunes atoms where `©ART` is checked before
    /// `aART`.
    pub fn artist(&self) -> Option<&str> {
        let candidates = [
            self.id3.album_artist.as_deref(),
            self.id3.artist.as_deref(),
            self.vorbis.album_artist.as_deref(),
            self.vorbis.artist.as_deref(),
            self.itunes.artist.as_deref(),
            self.itunes.album_artist.as_deref(),
            self.generic.album_artist.as_deref(),
            self.generic.artist.as_deref(),
        ];
        candidates.into_iter().find_map(non_blank)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(title: &str, artist: &str) -> DialectTags {
        DialectTags {
            title: Some(title.to_string()),
            artist: Some(artist.to_string()),
            album_artist: None,
            album: None,
        }
    }

    #[test]
    fn empty_record() {
        let tags = NormalizedTags::new();
        assert!(tags.is_empty());
        assert_eq!(tags.title(), None);
        assert_eq!(tags.artist(), None);
        assert_eq!(tags.album(), None);
    }

    #[test]
    fn id3_wins_over_vorbis() {
        let tags = NormalizedTags {
            id3: with("Id3 Title", "Id3 Artist"),
            vorbis: with("Vorbis Title", "Vorbis Artist"),
            ..Default::default()
        };
        assert_eq!(tags.title(), Some("Id3 Title"));
        assert_eq!(tags.artist(), Some("Id3 Artist"));
    }

    #[test]
    fn album_artist_preferred_within_dialect() {
        let mut tags = NormalizedTags::new();
        tags.vorbis.artist = Some("Track Artist".to_string());
        tags.vorbis.album_artist = Some("Album Artist".to_string());
        assert_eq!(tags.artist(), Some("Album Artist"));
    }

    #[test]
    fn itunes_artist_checked_before_album_artist() {
        let mut tags = NormalizedTags::new();
        tags.itunes.artist = Some("Track Artist".to_string());
        tags.itunes.album_artist = Some("Album Artist".to_string());
        assert_eq!(tags.artist(), Some("Track Artist"));
    }

    #[test]
    fn blank_values_are_skipped() {
        let mut tags = NormalizedTags::new();
        tags.id3.title = Some("   ".to_string());
        tags.vorbis.title = Some("Real".to_string());
        assert_eq!(tags.title(), Some("Real"));
    }

    #[test]
    fn merge_missing_keeps_first() {
        let mut first = DialectTags {
            title: Some("v2".to_string()),
            ..Default::default()
        };
        first.merge_missing(DialectTags {
            title: Some("v1".to_string()),
            album: Some("Album".to_string()),
            ..Default::default()
        });
        assert_eq!(first.title.as_deref(), Some("v2"));
        assert_eq!(first.album.as_deref(), Some("Album"));
    }
}
