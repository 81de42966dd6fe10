//! Soul Player Metadata
//!
//! Tag extraction and stream probing for the organizer.
//!
//! This crate provides:
//! - Tag reading from audio files (MP3, FLAC, OGG, OPUS, M4A, WMA, WAV, AIFF),
//!   with every value filed under the tag dialect it came from
//! - Bit rate probing from stream headers
//!
//! # Example
//!
//! ```rust,no_run
//! use soul_core::{BitrateProbe, MetadataReader};
//! use soul_metadata::{LoftyBitrateProbe, LoftyMetadataReader};
//! use std::path::Path;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tags = LoftyMetadataReader::new().read(Path::new("/music/song.mp3"))?;
//! println!("artist: {:?}", tags.artist());
//!
//! let kbps = LoftyBitrateProbe::new().probe(Path::new("/music/song.mp3"))?;
//! println!("{kbps} kbps");
//! # Ok(())
//! # }
//! ```

mod error;
mod probe;
mod reader;

pub use error::{MetadataError, Result};
pub use probe::LoftyBitrateProbe;
pub use reader::{dialect_of, LoftyMetadataReader};
