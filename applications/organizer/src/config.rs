/// Organizer configuration
///
/// Values come from, in increasing priority: built-in defaults, the INI
/// file, `SOUL_ORGANIZER__<SECTION>__<KEY>` environment variables, and the
/// command line.
use crate::cli::Cli;
use crate::error::{ConfigError, Result};
use serde::Deserialize;
use soul_importer::{
    AudioExtensions, OrganizeSettings, PlaylistSettings, UnresolvedPolicy, DEFAULT_PLAYLIST_NAME,
};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "soul-organizer.ini";

pub const DEFAULT_LOG_FILE: &str = "soul-organizer.log";

pub const ENV_PREFIX: &str = "SOUL_ORGANIZER";

/// Printed when the source or storage directory is missing
pub const EXAMPLE_CONFIG: &str = "\
[organizer]
source = /music/incoming
storage = /music/library
rename_source = false
; leave | keep-both
unresolved = leave

[logging]
level = info
log_file = soul-organizer.log
console_output = true

[audio_formats]
extensions = mp3, flac, ogg, mp4, m4a, wma, aac, opus

[playlist]
enabled = true
name = import_{timestamp}.m3u
";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizerConfig {
    #[serde(default)]
    pub organizer: OrganizerSection,

    #[serde(default)]
    pub logging: LoggingSection,

    #[serde(default)]
    pub audio_formats: AudioFormatsSection,

    #[serde(default)]
    pub playlist: PlaylistSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizerSection {
    pub source: Option<PathBuf>,

    pub storage: Option<PathBuf>,

    #[serde(default)]
    pub rename_source: bool,

    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    #[serde(default = "default_true")]
    pub console_output: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioFormatsSection {
    /// Comma separated, with or without leading dots
    pub extensions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistSection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_playlist_name")]
    pub name: String,

    pub directory: Option<PathBuf>,
}

/// Effective logging setup after applying command-line flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub file: PathBuf,
    pub console: bool,
}

impl OrganizerConfig {
    /// Load configuration from an INI file and the environment
    ///
    /// An explicit `path` must exist; otherwise `soul-organizer.ini` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Ini)
                        .required(true),
                );
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(
                        config::File::from(default_path).format(config::FileFormat::Ini),
                    );
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(list) = &self.audio_formats.extensions {
            if AudioExtensions::parse_list(list).is_empty() {
                return Err(ConfigError::Invalid(
                    "[audio_formats] extensions lists no extensions".to_string(),
                ));
            }
        }

        if self.playlist.name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "[playlist] name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Merge command-line overrides into run settings
    pub fn resolve(&self, cli: &Cli) -> Result<OrganizeSettings> {
        let source = cli
            .source
            .clone()
            .or_else(|| non_empty(self.organizer.source.as_ref()));
        let storage = cli
            .storage
            .clone()
            .or_else(|| non_empty(self.organizer.storage.as_ref()));

        let (source, storage) = match (source, storage) {
            (Some(source), Some(storage)) => (source, storage),
            (source, storage) => {
                let mut missing = Vec::new();
                if source.is_none() {
                    missing.push("source");
                }
                if storage.is_none() {
                    missing.push("storage");
                }
                return Err(ConfigError::MissingDirectories(missing));
            }
        };

        let extensions = self
            .audio_formats
            .extensions
            .as_deref()
            .map(AudioExtensions::parse_list)
            .unwrap_or_default();

        let playlist = PlaylistSettings {
            enabled: self.playlist.enabled && !cli.no_playlist,
            name_template: cli
                .playlist_name
                .clone()
                .unwrap_or_else(|| self.playlist.name.clone()),
            directory: cli
                .playlist_dir
                .clone()
                .or_else(|| non_empty(self.playlist.directory.as_ref())),
        };

        let unresolved_policy = cli
            .unresolved
            .map(UnresolvedPolicy::from)
            .unwrap_or(self.organizer.unresolved);

        let mut settings = OrganizeSettings::new(source, storage);
        settings.extensions = extensions;
        settings.playlist = playlist;
        settings.unresolved_policy = unresolved_policy;
        settings.rename_source = cli.rename_source || self.organizer.rename_source;
        Ok(settings)
    }

    /// Logging setup after `-v`, `-q` and `--log-file`
    pub fn log_settings(&self, cli: &Cli) -> LogSettings {
        let level = if cli.quiet {
            "error".to_string()
        } else if cli.verbose {
            "debug".to_string()
        } else {
            self.logging.level.clone()
        };

        LogSettings {
            level,
            file: cli
                .log_file
                .clone()
                .unwrap_or_else(|| self.logging.log_file.clone()),
            console: self.logging.console_output && !cli.quiet,
        }
    }
}

/// INI files write an unset path as `key =`
fn non_empty(path: Option<&PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty()).cloned()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_file: default_log_file(),
            console_output: true,
        }
    }
}

impl Default for PlaylistSection {
    fn default() -> Self {
        Self {
            enabled: true,
            name: default_playlist_name(),
            directory: None,
        }
    }
}

// Default values
fn default_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_true() -> bool {
    true
}

fn default_playlist_name() -> String {
    DEFAULT_PLAYLIST_NAME.to_string()
}
