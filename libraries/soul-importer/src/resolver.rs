//! Duplicate resolution for occupied library slots
//!
//! When a candidate's slot is already taken, sizes and bit rates decide
//! which file survives. Rules are checked in order and the first match wins:
//!
//! | # | Condition | Outcome |
//! |---|-----------|---------|
//! | 1 | sizes equal | discard candidate |
//! | 2 | existing larger, existing bit rate higher and known | discard candidate |
//! | 3 | candidate larger, same known bit rate | replace existing |
//! | 4 | candidate smaller, same known bit rate | discard candidate |
//! | 5 | candidate bit rate higher | replace existing |
//!
//! Anything else is unresolved. A bit rate of 0 means the probe failed.

use crate::copy::{free_sibling_name, move_file, replace_file};
use crate::{Result, RunStatistics, UnresolvedPolicy};
use soul_core::BitrateProbe;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Size and bit rate of one side of a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileQuality {
    pub size: u64,

    /// Kilobits per second, 0 when unknown
    pub bitrate: u32,
}

/// Which comparison rule decided a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    SameSize,
    ExistingLargerAndBetter,
    CandidateLargerSameBitrate,
    CandidateSmallerSameBitrate,
    CandidateHigherBitrate,
}

/// What to do with a candidate and its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateVerdict {
    /// Slot is free
    Place,

    /// Occupant is an empty file; delete it and place the candidate
    DiscardExisting,

    ReplaceExisting(Rule),

    DiscardCandidate(Rule),

    /// No rule matched; candidate goes next to the occupant under a new name
    KeepBothRenamed,

    /// No rule matched; candidate stays where it is
    Unresolved,
}

/// Decide the fate of a candidate given its slot's occupant, if any
pub fn decide(
    candidate: FileQuality,
    existing: Option<FileQuality>,
    policy: UnresolvedPolicy,
) -> DuplicateVerdict {
    let Some(existing) = existing else {
        return DuplicateVerdict::Place;
    };

    if existing.size == 0 {
        return DuplicateVerdict::DiscardExisting;
    }

    let (cand_size, exist_size) = (candidate.size, existing.size);
    let (cand_br, exist_br) = (candidate.bitrate, existing.bitrate);

    if cand_size == exist_size {
        DuplicateVerdict::DiscardCandidate(Rule::SameSize)
    } else if exist_size > cand_size && exist_br > cand_br && exist_br > 0 {
        DuplicateVerdict::DiscardCandidate(Rule::ExistingLargerAndBetter)
    } else if cand_size > exist_size && exist_br == cand_br && exist_br > 0 {
        DuplicateVerdict::ReplaceExisting(Rule::CandidateLargerSameBitrate)
    } else if cand_size < exist_size && exist_br == cand_br && exist_br > 0 {
        DuplicateVerdict::DiscardCandidate(Rule::CandidateSmallerSameBitrate)
    } else if cand_br > exist_br {
        DuplicateVerdict::ReplaceExisting(Rule::CandidateHigherBitrate)
    } else {
        match policy {
            UnresolvedPolicy::Leave => DuplicateVerdict::Unresolved,
            UnresolvedPolicy::KeepBoth => DuplicateVerdict::KeepBothRenamed,
        }
    }
}

/// Outcome of resolving one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub verdict: DuplicateVerdict,

    /// Where the candidate now lives, if it entered the library
    pub placed_at: Option<PathBuf>,
}

/// Applies [`decide`] to real files
pub struct DuplicateResolver<'a> {
    probe: &'a dyn BitrateProbe,
    policy: UnresolvedPolicy,
}

impl<'a> DuplicateResolver<'a> {
    pub fn new(probe: &'a dyn BitrateProbe, policy: UnresolvedPolicy) -> Self {
        Self { probe, policy }
    }

    /// Move `candidate` into `slot`, settling any collision
    ///
    /// A collision counts as a duplicate before any file is touched; the
    /// outcome counters only move once the filesystem work succeeded.
    pub fn resolve(
        &self,
        candidate: &Path,
        slot: &Path,
        stats: &mut RunStatistics,
    ) -> Result<Resolution> {
        let cand_size = fs::metadata(candidate)?.len();
        let existing_size = occupant_size(slot)?;

        let verdict = match existing_size {
            None => decide(FileQuality { size: cand_size, bitrate: 0 }, None, self.policy),
            Some(size) => {
                let cand = FileQuality {
                    size: cand_size,
                    bitrate: self.bitrate(candidate),
                };
                let existing = FileQuality {
                    size,
                    bitrate: self.bitrate(slot),
                };
                debug!(
                    "Collision at {}: candidate {} B @ {} kbps, existing {} B @ {} kbps",
                    slot.display(),
                    cand.size,
                    cand.bitrate,
                    existing.size,
                    existing.bitrate
                );
                decide(cand, Some(existing), self.policy)
            }
        };

        if !matches!(verdict, DuplicateVerdict::Place | DuplicateVerdict::DiscardExisting) {
            stats.duplicates_found += 1;
        }

        let placed_at = match verdict {
            DuplicateVerdict::Place => {
                move_file(candidate, slot)?;
                stats.newly_added += 1;
                info!("Added {}", slot.display());
                Some(slot.to_path_buf())
            }
            DuplicateVerdict::DiscardExisting => {
                replace_file(candidate, slot)?;
                stats.newly_added += 1;
                info!("Added {} (replaced empty file)", slot.display());
                Some(slot.to_path_buf())
            }
            DuplicateVerdict::ReplaceExisting(rule) => {
                replace_file(candidate, slot)?;
                stats.updated += 1;
                info!("Updated {} ({:?})", slot.display(), rule);
                Some(slot.to_path_buf())
            }
            DuplicateVerdict::DiscardCandidate(rule) => {
                fs::remove_file(candidate)?;
                stats.removed += 1;
                info!(
                    "Removed {}: {} is kept ({:?})",
                    candidate.display(),
                    slot.display(),
                    rule
                );
                None
            }
            DuplicateVerdict::KeepBothRenamed => {
                let renamed = free_sibling_name(slot)?;
                move_file(candidate, &renamed)?;
                stats.newly_added += 1;
                warn!(
                    "Could not decide between {} and {}; kept both as {}",
                    candidate.display(),
                    slot.display(),
                    renamed.display()
                );
                Some(renamed)
            }
            DuplicateVerdict::Unresolved => {
                stats.unresolved += 1;
                warn!(
                    "Could not decide between {} and {}; leaving candidate in place",
                    candidate.display(),
                    slot.display()
                );
                None
            }
        };

        Ok(Resolution { verdict, placed_at })
    }

    fn bitrate(&self, path: &Path) -> u32 {
        match self.probe.probe(path) {
            Ok(kbps) => kbps,
            Err(e) => {
                debug!("No bit rate for {}: {}", path.display(), e);
                0
            }
        }
    }
}

fn occupant_size(slot: &Path) -> Result<Option<u64>> {
    match fs::metadata(slot) {
        Ok(metadata) => Ok(Some(metadata.len())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
