//! Command-line interface

use clap::{Parser, ValueEnum};
use soul_importer::UnresolvedPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "soul-organizer")]
#[command(author, version, about = "Merge loose audio files into an Artist/Album library", long_about = None)]
pub struct Cli {
    /// Directory holding the files to ingest
    #[arg(short = 'S', long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Library root the files are merged into
    #[arg(short = 'T', long, value_name = "DIR", visible_alias = "destination")]
    pub storage: Option<PathBuf>,

    /// Configuration file (defaults to ./soul-organizer.ini when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors, and only to the log file
    #[arg(short, long)]
    pub quiet: bool,

    /// Log file path
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Playlist name template ({date}, {time}, {timestamp})
    #[arg(long, value_name = "TEMPLATE")]
    pub playlist_name: Option<String>,

    /// Directory to write the playlist to (defaults to the library root)
    #[arg(long, value_name = "DIR")]
    pub playlist_dir: Option<PathBuf>,

    /// Do not write a playlist
    #[arg(long)]
    pub no_playlist: bool,

    /// Rename source files after their title tag before organizing
    #[arg(long)]
    pub rename_source: bool,

    /// What to do when no rule decides between two versions of a track
    #[arg(long, value_enum, value_name = "POLICY")]
    pub unresolved: Option<UnresolvedArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnresolvedArg {
    /// Leave the new file in the source directory
    Leave,
    /// Keep both, renaming the new file to "name (N).ext"
    KeepBoth,
}

impl From<UnresolvedArg> for UnresolvedPolicy {
    fn from(arg: UnresolvedArg) -> Self {
        match arg {
            UnresolvedArg::Leave => UnresolvedPolicy::Leave,
            UnresolvedArg::KeepBoth => UnresolvedPolicy::KeepBoth,
        }
    }
}
