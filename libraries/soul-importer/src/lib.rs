//! Soul Player Library Organizer
//!
//! This crate merges a directory of loose audio files into an
//! `Artist/Album/` library.
//!
//! # Features
//!
//! - Tag based placement with file name fallbacks
//! - Size and bit rate comparison when a slot is already taken
//! - Removal of byte-identical files within an album directory
//! - Extended M3U playlist of everything placed in a run
//! - Optional renaming of source files after their title tag
//!
//! # Architecture
//!
//! - `scanner`: Audio file discovery in the source directory
//! - `metadata`: Tag extraction that never fails a file
//! - `placement`: Artist/album/title derivation and slot paths
//! - `resolver`: Duplicate resolution for occupied slots
//! - `dedup`: Content hashing and same-directory deduplication
//! - `copy`: Moves with a verified-copy fallback
//! - `playlist`: M3U output
//! - `renamer`: Title based renaming of source files
//! - `organizer`: Orchestration of a run
//!
//! # Example
//!
//! ```rust,no_run
//! use soul_importer::{OrganizeSettings, Organizer, RunContext};
//! # fn example() -> soul_importer::Result<()> {
//! let ctx = RunContext::with_lofty(OrganizeSettings::new("/music/incoming", "/music/library"));
//! let report = Organizer::new(&ctx).run()?;
//! println!("{}", report.stats.render_table(report.elapsed));
//! # Ok(())
//! # }
//! ```

mod error;
mod types;

pub mod copy;
pub mod dedup;
pub mod metadata;
pub mod organizer;
pub mod placement;
pub mod playlist;
pub mod renamer;
pub mod resolver;
pub mod scanner;

pub use error::ImportError;
pub use organizer::{Organizer, RunContext};
pub use scanner::AudioExtensions;
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;
