//! Common types for the importer

use crate::scanner::AudioExtensions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default playlist file name template
pub const DEFAULT_PLAYLIST_NAME: &str = "import_{timestamp}.m3u";

/// What to do with a candidate no duplicate rule decides on
///
/// This happens when sizes differ and neither bit rate is usable (both
/// probes failed, or the candidate's is lower without the existing file
/// being larger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnresolvedPolicy {
    /// Leave the candidate in the source directory (logged)
    #[default]
    Leave,

    /// Move the candidate next to the occupant under a "name (N).ext" name
    KeepBoth,
}

/// Playlist generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSettings {
    /// Whether to write a playlist at the end of a run
    pub enabled: bool,

    /// File name template; supports `{date}`, `{time}` and `{timestamp}`
    pub name_template: String,

    /// Target directory (defaults to the destination root)
    pub directory: Option<PathBuf>,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            name_template: DEFAULT_PLAYLIST_NAME.to_string(),
            directory: None,
        }
    }
}

/// Settings for one organize run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizeSettings {
    /// Directory holding the files to ingest (top level only)
    pub source_dir: PathBuf,

    /// Library root files are merged into
    pub dest_dir: PathBuf,

    /// Extensions treated as audio files
    pub extensions: AudioExtensions,

    /// Playlist generation
    pub playlist: PlaylistSettings,

    /// Handling of candidates no duplicate rule decides on
    pub unresolved_policy: UnresolvedPolicy,

    /// Rename source files after their title tag before placing them
    pub rename_source: bool,
}

impl OrganizeSettings {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            extensions: AudioExtensions::default(),
            playlist: PlaylistSettings::default(),
            unresolved_policy: UnresolvedPolicy::default(),
            rename_source: false,
        }
    }
}

/// Counters accumulated over one run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Audio files found in the source directory
    pub total_files: usize,

    /// Files moved into an empty slot
    pub newly_added: usize,

    /// Files that replaced a lower quality occupant
    pub updated: usize,

    /// Slot collisions plus identical files found by hashing
    pub duplicates_found: usize,

    /// Files deleted as duplicates
    pub removed: usize,

    /// Collisions no rule decided on
    pub unresolved: usize,

    /// Files left alone because no destination could be derived
    pub skipped: usize,

    /// Files whose processing failed with an IO error
    pub failed: usize,
}

impl RunStatistics {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            ..Default::default()
        }
    }

    /// Render the run-end report as a two column table
    pub fn render_table(&self, elapsed: Duration) -> String {
        let rows = [
            ("Total files", self.total_files.to_string()),
            ("Newly added", self.newly_added.to_string()),
            ("Updated", self.updated.to_string()),
            ("Duplicates found", self.duplicates_found.to_string()),
            ("Removed", self.removed.to_string()),
            ("Unresolved", self.unresolved.to_string()),
            ("Skipped", self.skipped.to_string()),
            ("Failed", self.failed.to_string()),
            ("Elapsed", format!("{:.2}s", elapsed.as_secs_f64())),
        ];

        let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let border = format!(
            "+-{}-+-{}-+",
            "-".repeat(label_width),
            "-".repeat(value_width)
        );

        let mut table = String::new();
        table.push_str(&border);
        table.push('\n');
        for (label, value) in &rows {
            table.push_str(&format!(
                "| {:<lw$} | {:>vw$} |\n",
                label,
                value,
                lw = label_width,
                vw = value_width
            ));
        }
        table.push_str(&border);
        table
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} added, {} updated, {} duplicates ({} removed, {} unresolved), {} skipped, {} failed",
            self.total_files,
            self.newly_added,
            self.updated,
            self.duplicates_found,
            self.removed,
            self.unresolved,
            self.skipped,
            self.failed
        )
    }
}

/// A file that ended up in the library during this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTrack {
    /// Final path inside the library
    pub path: PathBuf,

    /// Derived artist name
    pub artist: String,

    /// Derived title
    pub title: String,

    /// Playback duration, when known
    pub duration: Option<Duration>,
}

/// Outcome of one organize run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RunStatistics,

    /// Tracks placed this run, in processing order
    pub placed: Vec<PlacedTrack>,

    /// Playlist written at the end of the run
    pub playlist: Option<PathBuf>,

    pub elapsed: Duration,
}

impl RunReport {
    pub fn summary_text(&self) -> String {
        format!("Organize complete: {}", self.stats)
    }
}
