//! File scanning for audio files

use crate::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions recognised when no configuration overrides them
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".mp3", ".flac", ".ogg", ".mp4", ".m4a", ".wma", ".aac", ".opus",
];

/// Set of audio file extensions, stored lowercase with a leading dot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioExtensions(BTreeSet<String>);

impl AudioExtensions {
    /// Build a set, normalizing each entry (`"MP3"`, `"mp3"` and `".mp3"`
    /// all become `".mp3"`). Blank entries are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        )
    }

    /// Parse a comma separated list such as `"mp3, .FLAC,ogg"`
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, extension: &str) -> bool {
        normalize_extension(extension)
            .map(|ext| self.0.contains(&ext))
            .unwrap_or(false)
    }

    /// Check if a path has one of the extensions (case-insensitive)
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.contains(ext))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for AudioExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        None
    } else {
        Some(format!(".{}", ext))
    }
}

/// Scanner for audio files in a single directory
#[derive(Debug, Clone, Default)]
pub struct FileScanner {
    extensions: AudioExtensions,
}

impl FileScanner {
    /// Create a new file scanner
    pub fn new(extensions: AudioExtensions) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> &AudioExtensions {
        &self.extensions
    }

    /// List the audio files directly inside `path`, sorted by file name
    ///
    /// Subdirectories are not descended into. Sorting makes processing
    /// order independent of the platform's directory listing order.
    pub fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Err(ImportError::InvalidPath(format!(
                "{} does not exist",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(ImportError::InvalidPath(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let mut audio_files = Vec::new();
        for entry in fs::read_dir(path)? {
            let path = entry?.path();

            // Skip directories (follows symlinks)
            if !path.is_file() {
                continue;
            }

            if self.extensions.matches(&path) {
                audio_files.push(path);
            }
        }

        audio_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(audio_files)
    }
}
