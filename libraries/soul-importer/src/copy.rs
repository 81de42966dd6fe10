//! File moves into the library

use crate::dedup::compute_file_hash;
use crate::{ImportError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Highest counter tried when looking for a free " (N)" name
const MAX_SIBLING_ATTEMPTS: u32 = 1000;

/// Copy a file and check the copy's hash against the source
///
/// A copy whose hash differs is removed again.
pub fn copy_file_verified(source: &Path, dest: &Path) -> Result<()> {
    let expected_hash = compute_file_hash(source)?;

    fs::copy(source, dest)?;

    let actual_hash = compute_file_hash(dest)?;
    if expected_hash != actual_hash {
        let _ = fs::remove_file(dest);
        return Err(ImportError::Unknown(format!(
            "File verification failed: hash mismatch for {:?}",
            dest
        )));
    }
    debug!("File verification passed: {:?}", dest);

    Ok(())
}

/// Move a file, falling back to a verified copy and delete across devices
pub fn move_file(source: &Path, dest: &Path) -> Result<()> {
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }

    copy_file_verified(source, dest)?;
    fs::remove_file(source)?;

    Ok(())
}

/// Replace `dest` with `source`, removing the old occupant first
pub fn replace_file(source: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        fs::remove_file(dest)?;
    }
    move_file(source, dest)
}

/// First free "stem (N).ext" path next to `path`
///
/// `song.mp3` becomes `song (1).mp3`, then `song (2).mp3` and so on.
pub fn free_sibling_name(path: &Path) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ImportError::InvalidPath(format!("Invalid filename: {:?}", path)))?;
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new(""));

    for counter in 1..MAX_SIBLING_ATTEMPTS {
        let new_name = if extension.is_empty() {
            format!("{} ({})", stem, counter)
        } else {
            format!("{} ({}).{}", stem, counter, extension)
        };

        let new_path = parent.join(&new_name);
        if !new_path.exists() {
            return Ok(new_path);
        }
    }

    Err(ImportError::Unknown(format!(
        "Could not find a free name for {:?} after {} attempts",
        path, MAX_SIBLING_ATTEMPTS
    )))
}
