//! Run orchestration: scan, place, resolve, deduplicate, write playlist

use crate::dedup::ContentDeduplicator;
use crate::metadata::extract_tags;
use crate::placement::{PlacementSlot, TrackRecord};
use crate::playlist::PlaylistWriter;
use crate::renamer::TitleRenamer;
use crate::resolver::{DuplicateResolver, Resolution};
use crate::scanner::FileScanner;
use crate::{
    ImportError, OrganizeSettings, PlacedTrack, Result, RunReport, RunStatistics,
};
use chrono::Local;
use soul_core::{BitrateProbe, MetadataReader};
use soul_metadata::{LoftyBitrateProbe, LoftyMetadataReader};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Everything a run needs, built once at startup
pub struct RunContext {
    pub settings: OrganizeSettings,
    pub reader: Box<dyn MetadataReader>,
    pub probe: Box<dyn BitrateProbe>,
}

impl RunContext {
    pub fn new(
        settings: OrganizeSettings,
        reader: Box<dyn MetadataReader>,
        probe: Box<dyn BitrateProbe>,
    ) -> Self {
        Self {
            settings,
            reader,
            probe,
        }
    }

    /// Context backed by lofty for tags and bit rates
    pub fn with_lofty(settings: OrganizeSettings) -> Self {
        Self::new(
            settings,
            Box::new(LoftyMetadataReader::new()),
            Box::new(LoftyBitrateProbe::new()),
        )
    }
}

/// Merges a source directory into the library
pub struct Organizer<'a> {
    ctx: &'a RunContext,
}

impl<'a> Organizer<'a> {
    pub fn new(ctx: &'a RunContext) -> Self {
        Self { ctx }
    }

    /// Process every audio file at the top of the source directory
    ///
    /// Per-file failures are logged and counted; only a bad source or
    /// destination directory fails the run.
    pub fn run(&self) -> Result<RunReport> {
        let start_time = Instant::now();
        let settings = &self.ctx.settings;

        self.check_directories()?;

        info!(
            "Organizing {} into {}",
            settings.source_dir.display(),
            settings.dest_dir.display()
        );

        if settings.rename_source {
            let renamer = TitleRenamer::new(self.ctx.reader.as_ref(), settings.extensions.clone());
            if let Err(e) = renamer.rename_tree(&settings.source_dir) {
                error!("Renaming source files failed: {}", e);
            }
        }

        let scanner = FileScanner::new(settings.extensions.clone());
        let files = scanner.list_directory(&settings.source_dir)?;
        info!("Found {} audio files", files.len());

        let mut stats = RunStatistics::new(files.len());
        let mut placed = Vec::new();
        let mut dedup = ContentDeduplicator::new(settings.extensions.clone());
        let resolver = DuplicateResolver::new(self.ctx.probe.as_ref(), settings.unresolved_policy);

        for path in &files {
            self.process_file(path, &resolver, &mut dedup, &mut stats, &mut placed);
        }

        let playlist = if settings.playlist.enabled {
            let writer = PlaylistWriter::from_settings(&settings.playlist, &settings.dest_dir);
            match writer.write(&placed, &Local::now()) {
                Ok(path) => path,
                Err(e) => {
                    error!("Failed to write playlist: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let report = RunReport {
            stats,
            placed,
            playlist,
            elapsed: start_time.elapsed(),
        };
        info!("{}", report.summary_text());
        Ok(report)
    }

    fn check_directories(&self) -> Result<()> {
        let settings = &self.ctx.settings;

        if !settings.source_dir.is_dir() {
            return Err(ImportError::Configuration(format!(
                "Source directory {} does not exist or is not a directory",
                settings.source_dir.display()
            )));
        }

        if settings.dest_dir.exists() && !settings.dest_dir.is_dir() {
            return Err(ImportError::Configuration(format!(
                "Destination {} is not a directory",
                settings.dest_dir.display()
            )));
        }

        fs::create_dir_all(&settings.dest_dir)?;
        Ok(())
    }

    fn process_file(
        &self,
        path: &Path,
        resolver: &DuplicateResolver<'_>,
        dedup: &mut ContentDeduplicator,
        stats: &mut RunStatistics,
        placed: &mut Vec<PlacedTrack>,
    ) {
        let root = &self.ctx.settings.dest_dir;
        let tags = extract_tags(self.ctx.reader.as_ref(), path);
        let record = TrackRecord::derive(path, tags);

        let slot = match PlacementSlot::for_track(&record) {
            Ok(slot) => slot,
            Err(reason) => {
                warn!("Cannot place {} ({}), leaving it in place", path.display(), reason);
                stats.skipped += 1;
                return;
            }
        };

        let dir = match slot.prepare(root) {
            Ok(dir) => dir,
            Err(e) => {
                error!("Failed to create {}: {}", slot.directory(root).display(), e);
                stats.failed += 1;
                return;
            }
        };

        let slot_path = dir.join(&slot.file_name);
        if slot_path == path {
            debug!("{} is already in place", path.display());
            stats.skipped += 1;
            return;
        }

        match resolver.resolve(path, &slot_path, stats) {
            Ok(Resolution {
                placed_at: Some(placed_at),
                ..
            }) => placed.push(PlacedTrack {
                path: placed_at,
                artist: record.artist,
                title: record.title,
                duration: record.tags.duration,
            }),
            Ok(_) => {}
            Err(e) => {
                error!("Failed to place {}: {}", path.display(), e);
                stats.failed += 1;
            }
        }

        match dedup.sweep(&dir, stats) {
            Ok(report) if !report.removed.is_empty() => {
                placed.retain(|track| !report.removed.contains(&track.path));
            }
            Ok(_) => {}
            Err(e) => error!("Failed to deduplicate {}: {}", dir.display(), e),
        }
    }
}
