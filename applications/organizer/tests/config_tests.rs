//! Loading INI configuration files

use soul_importer::{AudioExtensions, UnresolvedPolicy};
use soul_organizer::{Cli, ConfigError, OrganizerConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_ini(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("soul-organizer.ini");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_load_full_file() {
    let temp = TempDir::new().unwrap();
    let path = write_ini(
        &temp,
        "\
[organizer]
source = /music/incoming
storage = /music/library
rename_source = true
unresolved = keep-both

[logging]
level = debug
log_file = logs/run.log
console_output = false

[audio_formats]
extensions = MP3, .flac

[playlist]
enabled = false
name = {date}.m3u8
directory =
",
    );

    let config = OrganizerConfig::load(Some(path.as_path())).unwrap();
    let settings = config.resolve(&Cli::default()).unwrap();

    assert_eq!(settings.source_dir, PathBuf::from("/music/incoming"));
    assert_eq!(settings.dest_dir, PathBuf::from("/music/library"));
    assert!(settings.rename_source);
    assert_eq!(settings.unresolved_policy, UnresolvedPolicy::KeepBoth);
    assert_eq!(settings.extensions, AudioExtensions::new([".mp3", ".flac"]));
    assert!(!settings.playlist.enabled);
    assert_eq!(settings.playlist.name_template, "{date}.m3u8");
    assert_eq!(settings.playlist.directory, None);

    let log = config.log_settings(&Cli::default());
    assert_eq!(log.level, "debug");
    assert_eq!(log.file, PathBuf::from("logs/run.log"));
    assert!(!log.console);
}

#[test]
fn test_partial_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let path = write_ini(&temp, "[organizer]\nsource = /in\n");

    let config = OrganizerConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.logging.level, "info");
    assert!(config.playlist.enabled);

    let cli = Cli {
        storage: Some(PathBuf::from("/lib")),
        ..Default::default()
    };
    let settings = config.resolve(&cli).unwrap();
    assert_eq!(settings.source_dir, PathBuf::from("/in"));
    assert_eq!(settings.dest_dir, PathBuf::from("/lib"));
    assert_eq!(settings.extensions, AudioExtensions::default());
}

#[test]
fn test_missing_storage_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = write_ini(&temp, "[organizer]\nsource = /in\nstorage =\n");

    let config = OrganizerConfig::load(Some(path.as_path())).unwrap();
    let err = config.resolve(&Cli::default()).unwrap_err();

    assert!(matches!(err, ConfigError::MissingDirectories(ref m) if m == &vec!["storage"]));
    assert!(err.to_string().contains("storage"));
}

#[test]
fn test_empty_extension_list_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = write_ini(&temp, "[audio_formats]\nextensions = , ,\n");

    let err = OrganizerConfig::load(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_explicit_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let err = OrganizerConfig::load(Some(temp.path().join("nope.ini").as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}
