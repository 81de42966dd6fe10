//! Extended M3U playlists of the tracks placed in a run
//!
//! # Name placeholders
//!
//! - `{date}` - `2024-03-01`
//! - `{time}` - `142530`
//! - `{timestamp}` - `20240301_142530`
//!
//! `.m3u` is appended when the template has neither an `.m3u` nor an
//! `.m3u8` extension.

use crate::{PlacedTrack, PlaylistSettings, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct PlaylistWriter {
    name_template: String,
    directory: PathBuf,
}

impl PlaylistWriter {
    pub fn new(name_template: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name_template: name_template.into(),
            directory: directory.into(),
        }
    }

    /// Writer for a run, placing the playlist in the library root unless
    /// the settings name another directory
    pub fn from_settings(settings: &PlaylistSettings, dest_root: &Path) -> Self {
        let directory = settings
            .directory
            .clone()
            .unwrap_or_else(|| dest_root.to_path_buf());
        Self::new(settings.name_template.clone(), directory)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Expand the name template for a given moment
    pub fn file_name(&self, now: &DateTime<Local>) -> String {
        let name = self
            .name_template
            .replace("{date}", &now.format("%Y-%m-%d").to_string())
            .replace("{time}", &now.format("%H%M%S").to_string())
            .replace("{timestamp}", &now.format("%Y%m%d_%H%M%S").to_string());

        let lower = name.to_lowercase();
        if lower.ends_with(".m3u") || lower.ends_with(".m3u8") {
            name
        } else {
            format!("{}.m3u", name)
        }
    }

    /// Render the playlist body
    pub fn render(&self, name: &str, tracks: &[PlacedTrack], now: &DateTime<Local>) -> String {
        let mut out = String::new();
        out.push_str("#EXTM3U\n");
        out.push_str(&format!("# Playlist: {}\n", name));
        out.push_str(&format!("# Generated: {}\n", now.format("%Y-%m-%d %H:%M:%S")));
        out.push_str(&format!("# Tracks: {}\n", tracks.len()));

        for track in tracks {
            let seconds = track
                .duration
                .map(|d| d.as_secs() as i64)
                .unwrap_or(-1);
            out.push('\n');
            out.push_str(&format!(
                "#EXTINF:{},{} - {}\n",
                seconds, track.artist, track.title
            ));
            out.push_str(&self.entry_path(&track.path));
            out.push('\n');
        }

        out
    }

    /// Write the playlist; nothing is written for an empty track list
    pub fn write(&self, tracks: &[PlacedTrack], now: &DateTime<Local>) -> Result<Option<PathBuf>> {
        if tracks.is_empty() {
            info!("No tracks placed, skipping playlist");
            return Ok(None);
        }

        fs::create_dir_all(&self.directory)?;

        let name = self.file_name(now);
        let path = self.directory.join(&name);
        fs::write(&path, self.render(&name, tracks, now))?;

        info!("Wrote playlist {} ({} tracks)", path.display(), tracks.len());
        Ok(Some(path))
    }

    /// Track path relative to the playlist directory, `/`-separated
    fn entry_path(&self, track: &Path) -> String {
        let relative = pathdiff::diff_paths(track, &self.directory)
            .unwrap_or_else(|| track.to_path_buf());
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}
