//! Destination derivation for library placement
//!
//! A track lands in `<root>/<Artist>/<Album>/<original file name>`, with the
//! album level dropped when there is no album tag or the album is named
//! after the artist.
//!
//! | Field | Sources, in order | Fallback |
//! |-------|-------------------|----------|
//! | Artist | ID3 album artist, ID3 artist, Vorbis album artist, Vorbis artist, iTunes artist, iTunes album artist, generic album artist, generic artist | File name before the first `-` |
//! | Title | ID3, Vorbis, iTunes, generic title | File name after the first `-`, else the stem |
//! | Album | ID3, Vorbis, iTunes, generic album | None |

use soul_core::NormalizedTags;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Characters replaced when a tag becomes a directory name
pub const COMPONENT_BLACKLIST: &[char] = &[
    '/', '\\', ':', '*', '?', '"', '<', '>', '|', '!', '(', ')', '[', ']', '{', '}', '@', '#',
    '$', '%', '^', '&', '=', '+', '`', '~',
];

/// Characters replaced when a title becomes a file name
///
/// Only characters that are illegal on common filesystems; brackets and
/// punctuation survive a rename.
pub const FILE_NAME_BLACKLIST: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '!'];

fn replace_chars(s: &str, blacklist: &[char]) -> String {
    s.chars()
        .map(|c| if blacklist.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitize a tag value for use as a directory name
pub fn sanitize_component(s: &str) -> String {
    replace_chars(s, COMPONENT_BLACKLIST)
}

/// Sanitize a title for use as a file name
pub fn sanitize_file_name(s: &str) -> String {
    replace_chars(s, FILE_NAME_BLACKLIST)
}

/// Names derived from a file's tags, already sanitized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    pub artist: String,
    pub title: String,
    pub album: Option<String>,
}

/// Derive artist, title and album for a file
///
/// `file_name` is the file's own name, extension included, and is only
/// consulted when the tags carry no artist or title. The `-` split runs on
/// the full name; only a title without a `-` falls back to the stem.
pub fn derive_names(tags: &NormalizedTags, file_name: &str) -> DerivedNames {
    let split = file_name.split_once('-');

    let artist = match tags.artist() {
        Some(artist) => artist.to_string(),
        None => split
            .map(|(before, _)| before)
            .unwrap_or(file_name)
            .trim()
            .to_string(),
    };

    let title = match tags.title() {
        Some(title) => title.to_string(),
        None => match split {
            Some((_, after)) => after.trim().to_string(),
            None => Path::new(file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name)
                .trim()
                .to_string(),
        },
    };

    let album = tags
        .album()
        .map(|album| sanitize_component(album.trim()))
        .filter(|album| !album.is_empty());

    DerivedNames {
        artist: sanitize_component(&artist),
        title: sanitize_component(&title),
        album,
    }
}

/// One input file with everything placement needs
#[derive(Debug, Clone)]
pub struct TrackRecord {
    pub source_path: PathBuf,
    pub tags: NormalizedTags,
    pub artist: String,
    pub title: String,
    pub album: Option<String>,
}

impl TrackRecord {
    /// Build a record from a file and its extracted tags
    pub fn derive(source_path: &Path, tags: NormalizedTags) -> Self {
        let file_name = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let names = derive_names(&tags, file_name);

        Self {
            source_path: source_path.to_path_buf(),
            tags,
            artist: names.artist,
            title: names.title,
            album: names.album,
        }
    }
}

/// Why a track has no slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Unplaceable {
    #[error("file name is not valid UTF-8")]
    InvalidFileName,

    #[error("no artist")]
    NoArtist,
}

/// Where a track should live, relative to the library root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementSlot {
    pub artist_dir: String,
    pub album_dir: Option<String>,
    pub file_name: String,
}

impl PlacementSlot {
    /// Compute the slot for a record
    ///
    /// Fails when the source path has no UTF-8 file name or the artist is
    /// empty after sanitization.
    pub fn for_track(record: &TrackRecord) -> Result<Self, Unplaceable> {
        let file_name = record
            .source_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(Unplaceable::InvalidFileName)?
            .to_string();

        if record.artist.is_empty() {
            return Err(Unplaceable::NoArtist);
        }

        // Avoid Artist/Artist/ when the album is named after the artist
        let album_dir = record
            .album
            .as_ref()
            .filter(|album| **album != record.artist)
            .cloned();

        Ok(Self {
            artist_dir: record.artist.clone(),
            album_dir,
            file_name,
        })
    }

    /// Directory holding the slot
    pub fn directory(&self, root: &Path) -> PathBuf {
        let dir = root.join(&self.artist_dir);
        match &self.album_dir {
            Some(album) => dir.join(album),
            None => dir,
        }
    }

    /// Full slot path
    pub fn path(&self, root: &Path) -> PathBuf {
        self.directory(root).join(&self.file_name)
    }

    /// Create the slot directory if needed and return it
    pub fn prepare(&self, root: &Path) -> io::Result<PathBuf> {
        let dir = self.directory(root);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
