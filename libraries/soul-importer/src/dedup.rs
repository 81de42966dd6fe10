//! Content hashing and same-directory deduplication

use crate::scanner::{AudioExtensions, FileScanner};
use crate::{Result, RunStatistics};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, error, info};

/// Buffer size for streaming hashes (64 KiB)
pub const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 hash of a file as lowercase hex
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(HASH_CHUNK_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[derive(Debug, Clone)]
struct CachedDigest {
    len: u64,
    modified: Option<SystemTime>,
    digest: String,
}

/// Result of sweeping one directory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Audio files hashed or looked up in the cache
    pub scanned: usize,

    /// Files deleted as content duplicates
    pub removed: Vec<PathBuf>,
}

/// Removes byte-identical audio files within a directory
///
/// Digests are cached by path for the lifetime of the deduplicator and
/// reused while the file's length and modification time are unchanged, so
/// repeated sweeps of a large album directory only hash new arrivals.
#[derive(Debug)]
pub struct ContentDeduplicator {
    scanner: FileScanner,
    cache: HashMap<PathBuf, CachedDigest>,
}

impl ContentDeduplicator {
    pub fn new(extensions: AudioExtensions) -> Self {
        Self {
            scanner: FileScanner::new(extensions),
            cache: HashMap::new(),
        }
    }

    /// Delete every audio file in `dir` whose content repeats an earlier one
    ///
    /// Files are visited in file name order and the first occurrence of a
    /// hash is kept. Files that cannot be hashed or deleted are logged and
    /// left alone.
    pub fn sweep(&mut self, dir: &Path, stats: &mut RunStatistics) -> Result<SweepReport> {
        let files = self.scanner.list_directory(dir)?;
        let mut report = SweepReport::default();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for path in files {
            report.scanned += 1;

            let digest = match self.digest(&path) {
                Ok(digest) => digest,
                Err(e) => {
                    error!("Failed to hash {}: {}", path.display(), e);
                    continue;
                }
            };

            let Some(original) = seen.get(&digest) else {
                seen.insert(digest, path);
                continue;
            };

            info!(
                "Removing {} (same content as {})",
                path.display(),
                original.display()
            );
            stats.duplicates_found += 1;

            match fs::remove_file(&path) {
                Ok(()) => {
                    stats.removed += 1;
                    self.cache.remove(&path);
                    report.removed.push(path);
                }
                Err(e) => error!("Failed to delete {}: {}", path.display(), e),
            }
        }

        Ok(report)
    }

    fn digest(&mut self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)?;
        let len = metadata.len();
        let modified = metadata.modified().ok();

        if let Some(cached) = self.cache.get(path) {
            if cached.len == len && cached.modified == modified {
                return Ok(cached.digest.clone());
            }
        }

        let digest = compute_file_hash(path)?;
        debug!("{} sha256={}", path.display(), digest);
        self.cache.insert(
            path.to_path_buf(),
            CachedDigest {
                len,
                modified,
                digest: digest.clone(),
            },
        );
        Ok(digest)
    }
}
