//! Renames source files after their title tag

use crate::metadata::extract_tags;
use crate::placement::sanitize_file_name;
use crate::scanner::{AudioExtensions, FileScanner};
use crate::{ImportError, Result};
use soul_core::MetadataReader;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

const MAX_COLLISIONS: u32 = 1000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameStats {
    pub renamed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Renames audio files to `<title>.<ext>`
pub struct TitleRenamer<'a> {
    reader: &'a dyn MetadataReader,
    scanner: FileScanner,
}

impl<'a> TitleRenamer<'a> {
    pub fn new(reader: &'a dyn MetadataReader, extensions: AudioExtensions) -> Self {
        Self {
            reader,
            scanner: FileScanner::new(extensions),
        }
    }

    /// Rename audio files in `root` and every directory below it
    pub fn rename_tree(&self, root: &Path) -> Result<RenameStats> {
        if !root.is_dir() {
            return Err(ImportError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let mut stats = RenameStats::default();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            match self.rename_directory(entry.path()) {
                Ok(dir_stats) => {
                    stats.renamed += dir_stats.renamed;
                    stats.unchanged += dir_stats.unchanged;
                    stats.failed += dir_stats.failed;
                }
                Err(e) => error!("Failed to rename files in {}: {}", entry.path().display(), e),
            }
        }

        info!(
            "Renamed {} files ({} unchanged, {} failed)",
            stats.renamed, stats.unchanged, stats.failed
        );
        Ok(stats)
    }

    /// Rename the audio files directly inside `dir`
    pub fn rename_directory(&self, dir: &Path) -> Result<RenameStats> {
        let mut stats = RenameStats::default();

        for path in self.scanner.list_directory(dir)? {
            match self.rename_file(&path) {
                Ok(Some(new_path)) => {
                    info!("Renamed {} -> {}", path.display(), new_path.display());
                    stats.renamed += 1;
                }
                Ok(None) => stats.unchanged += 1,
                Err(e) => {
                    error!("Failed to rename {}: {}", path.display(), e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }

    /// Rename one file, returning its new path if it moved
    fn rename_file(&self, path: &Path) -> Result<Option<PathBuf>> {
        let tags = extract_tags(self.reader, path);
        let Some(title) = tags.title().map(sanitize_file_name).filter(|t| !t.is_empty()) else {
            debug!("{} has no title tag", path.display());
            return Ok(None);
        };

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parent = path.parent().unwrap_or(Path::new(""));

        for counter in 0..MAX_COLLISIONS {
            let stem = if counter == 0 {
                title.clone()
            } else {
                format!("{} ({})", title, counter)
            };
            let name = if extension.is_empty() {
                stem
            } else {
                format!("{}.{}", stem, extension)
            };

            let target = parent.join(&name);
            if target == path {
                return Ok(None);
            }
            if !target.exists() {
                fs::rename(path, &target)?;
                return Ok(Some(target));
            }
        }

        Err(ImportError::Unknown(format!(
            "No free name for {:?} after {} attempts",
            path, MAX_COLLISIONS
        )))
    }
}
