/// Bit rate probe using lofty stream properties
use crate::error::MetadataError;
use lofty::AudioFile;
use soul_core::{BitrateProbe, SoulError};
use std::path::Path;

/// Reads the estimated bit rate from an audio stream header
///
/// The audio stream bit rate is preferred; the overall bit rate (which
/// includes tag overhead) is used when the format does not report one.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyBitrateProbe;

impl LoftyBitrateProbe {
    /// Create a new probe
    pub fn new() -> Self {
        Self
    }
}

impl BitrateProbe for LoftyBitrateProbe {
    fn probe(&self, path: &Path) -> soul_core::Result<u32> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()).into());
        }
        if !path.is_file() {
            return Err(SoulError::invalid_input(format!("{} is not a file", path.display())));
        }

        let tagged_file = lofty::read_from_path(path).map_err(MetadataError::from)?;
        let properties = tagged_file.properties();

        properties
            .audio_bitrate()
            .or(properties.overall_bitrate())
            .filter(|kbps| *kbps > 0)
            .ok_or_else(|| MetadataError::NoBitrate(path.display().to_string()).into())
    }
}
