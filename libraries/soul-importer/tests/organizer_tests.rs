//! End-to-end runs of the organizer against temp directories

use soul_importer::{ImportError, Organizer, UnresolvedPolicy};
use std::fs;

use test_helpers::{FakeProbe, FakeReader, Workspace};

#[test]
fn test_places_tracks_into_artist_album_tree() {
    let ws = Workspace::new();
    ws.add_source("01.mp3", b"when doves cry");
    ws.add_source("02.flac", b"purple rain");
    ws.add_source("cover.jpg", b"not audio");

    let reader = FakeReader::default()
        .with("01.mp3", "Prince", "When Doves Cry", Some("Purple Rain"))
        .with("02.flac", "Prince", "Purple Rain", Some("Prince"));
    let ctx = ws.context(ws.settings(), reader, FakeProbe::default());

    let report = Organizer::new(&ctx).run().unwrap();

    assert_eq!(report.stats.total_files, 2);
    assert_eq!(report.stats.newly_added, 2);
    assert_eq!(report.stats.duplicates_found, 0);
    assert!(ws.library.join("Prince/Purple Rain/01.mp3").exists());
    // Album named after the artist
    assert!(ws.library.join("Prince/02.flac").exists());
    assert!(!ws.source.join("01.mp3").exists());
    assert!(ws.source.join("cover.jpg").exists());

    let playlist = report.playlist.expect("playlist should be written");
    assert_eq!(playlist.parent().unwrap(), ws.library);
    let body = fs::read_to_string(&playlist).unwrap();
    assert!(body.contains("#EXTINF:200,Prince - When Doves Cry\nPrince/Purple Rain/01.mp3\n"));
    assert!(body.contains("#EXTINF:200,Prince - Purple Rain\nPrince/02.flac\n"));
}

#[test]
fn test_untagged_file_uses_file_name() {
    let ws = Workspace::new();
    ws.add_source("Daft Punk - One More Time.mp3", b"one more time");

    let ctx = ws.context(ws.settings(), FakeReader::default(), FakeProbe::default());
    let report = Organizer::new(&ctx).run().unwrap();

    assert_eq!(report.stats.newly_added, 1);
    assert!(ws
        .library
        .join("Daft Punk/Daft Punk - One More Time.mp3")
        .exists());
    assert_eq!(report.placed[0].title, "One More Time.mp3");
    assert_eq!(report.placed[0].duration, None);
}

#[test]
fn test_file_without_artist_is_skipped() {
    let ws = Workspace::new();
    let source = ws.add_source("song.mp3", b"data");

    let reader = FakeReader::default().with("song.mp3", "???", "Song", None);
    let ctx = ws.context(ws.settings(), reader, FakeProbe::default());
    let report = Organizer::new(&ctx).run().unwrap();

    assert_eq!(report.stats.skipped, 1);
    assert_eq!(report.stats.newly_added, 0);
    assert!(source.exists());
    assert!(report.playlist.is_none());
}

#[test]
fn test_same_size_collision_discards_candidate() {
    let ws = Workspace::new();
    let existing = ws.add_library("Queen/Jazz/song.mp3", b"existing!");
    let candidate = ws.add_source("song.mp3", b"candidate");

    let reader = FakeReader::default().with("song.mp3", "Queen", "Mustapha", Some("Jazz"));
    let ctx = ws.context(ws.settings(), reader, FakeProbe::default());
    let report = Organizer::new(&ctx).run().unwrap();

    assert_eq!(report.stats.duplicates_found, 1);
    assert_eq!(report.stats.removed, 1);
    assert!(!candidate.exists());
    assert_eq!(fs::read(&existing).unwrap(), b"existing!");
    assert!(report.placed.is_empty());
    assert!(report.playlist.is_none());
}

#[test]
fn test_larger_file_at_same_bitrate_replaces_occupant() {
    let ws = Workspace::new();
    let existing = ws.add_library("Queen/Jazz/song.mp3", &[1u8; 300]);
    ws.add_source("song.mp3", &[2u8; 500]);

    let reader = FakeReader::default().with("song.mp3", "Queen", "Mustapha", Some("Jazz"));
    let probe = FakeProbe::default().with(300, 320).with(500, 320);
    let ctx = ws.context(ws.settings(), reader, probe);
    let report = Organizer::new(&ctx).run().unwrap();

    assert_eq!(report.stats.duplicates_found, 1);
    assert_eq!(report.stats.updated, 1);
    assert_eq!(fs::read(&existing).unwrap(), vec![2u8; 500]);
    assert_eq!(report.placed.len(), 1);
}

#[test]
fn test_better_existing_file_is_kept() {
    let ws = Workspace::new();
    let existing = ws.add_library("Queen/Jazz/song.mp3", &[1u8; 500]);
    let candidate = ws.add_source("song.mp3", &[2u8; 300]);

    let reader = FakeReader::default().with("song.mp3", "Queen", "Mustapha", Some("Jazz"));
    let probe = FakeProbe::default().with(300, 128).with(500, 320);
    let ctx = ws.context(ws.settings(), reader, probe);
    let report = Organizer::new(&ctx).run().unwrap();

    assert_eq!(report.stats.removed, 1);
    assert!(!candidate.exists());
    assert_eq!(fs::read(&existing).unwrap(), vec![1u8; 500]);
}

#[test]
fn test_unresolved_collision_leaves_candidate_and_is_idempotent() {
    let ws = Workspace::new();
    let existing = ws.add_library("Queen/Jazz/song.mp3", &[1u8; 500]);
    let candidate = ws.add_source("song.mp3", &[2u8; 300]);

    let settings = ws.settings();
    let reader = || FakeReader::default().with("song.mp3", "Queen", "Mustapha", Some("Jazz"));

    let ctx = ws.context(settings.clone(), reader(), FakeProbe::default());
    let first = Organizer::new(&ctx).run().unwrap();

    assert_eq!(first.stats.duplicates_found, 1);
    assert_eq!(first.stats.unresolved, 1);
    assert!(candidate.exists());
    assert_eq!(fs::read(&existing).unwrap(), vec![1u8; 500]);

    let ctx = ws.context(settings, reader(), FakeProbe::default());
    let second = Organizer::new(&ctx).run().unwrap();

    assert_eq!(second.stats.newly_added, 0);
    assert_eq!(second.stats.updated, 0);
    assert_eq!(second.stats.removed, 0);
    assert_eq!(second.stats.unresolved, 1);
    assert!(candidate.exists());
    assert_eq!(fs::read(&existing).unwrap(), vec![1u8; 500]);
}

#[test]
fn test_keep_both_policy_renames_candidate() {
    let ws = Workspace::new();
    ws.add_library("Queen/Jazz/song.mp3", &[1u8; 500]);
    ws.add_source("song.mp3", &[2u8; 300]);

    let mut settings = ws.settings();
    settings.unresolved_policy = UnresolvedPolicy::KeepBoth;
    let reader = FakeReader::default().with("song.mp3", "Queen", "Mustapha", Some("Jazz"));
    let ctx = ws.context(settings, reader, FakeProbe::default());
    let report = Organizer::new(&ctx).run().unwrap();

    let renamed = ws.library.join("Queen/Jazz/song (1).mp3");
    assert_eq!(fs::read(&renamed).unwrap(), vec![2u8; 300]);
    assert_eq!(report.stats.newly_added, 1);
    assert_eq!(report.placed[0].path, renamed);
}

#[test]
fn test_identical_content_is_deduplicated() {
    let ws = Workspace::new();
    ws.add_source("a.mp3", b"identical audio");
    ws.add_source("b.mp3", b"identical audio");

    let reader = FakeReader::default()
        .with("a.mp3", "Artist", "Take One", Some("Album"))
        .with("b.mp3", "Artist", "Take Two", Some("Album"));
    let ctx = ws.context(ws.settings(), reader, FakeProbe::default());
    let report = Organizer::new(&ctx).run().unwrap();

    let album = ws.library.join("Artist/Album");
    assert!(album.join("a.mp3").exists());
    assert!(!album.join("b.mp3").exists());
    assert_eq!(report.stats.newly_added, 2);
    assert_eq!(report.stats.duplicates_found, 1);
    assert_eq!(report.stats.removed, 1);

    // The deleted copy never reaches the playlist
    assert_eq!(report.placed.len(), 1);
    let body = fs::read_to_string(report.playlist.unwrap()).unwrap();
    assert!(body.contains("# Tracks: 1"));
    assert!(!body.contains("b.mp3"));
}

#[test]
fn test_second_run_without_new_files_changes_nothing() {
    let ws = Workspace::new();
    ws.add_source("01.mp3", b"track");

    let settings = ws.settings();
    let reader = || FakeReader::default().with("01.mp3", "Artist", "Track", None);

    let ctx = ws.context(settings.clone(), reader(), FakeProbe::default());
    Organizer::new(&ctx).run().unwrap();

    let ctx = ws.context(settings, reader(), FakeProbe::default());
    let second = Organizer::new(&ctx).run().unwrap();

    assert_eq!(second.stats.total_files, 0);
    assert!(second.placed.is_empty());
    assert!(second.playlist.is_none());
    assert!(ws.library.join("Artist/01.mp3").exists());
}

#[test]
fn test_playlist_can_be_disabled_or_redirected() {
    let ws = Workspace::new();
    ws.add_source("01.mp3", b"track");
    let reader = || FakeReader::default().with("01.mp3", "Artist", "Track", None);

    let mut settings = ws.settings();
    settings.playlist.enabled = false;
    let ctx = ws.context(settings, reader(), FakeProbe::default());
    assert!(Organizer::new(&ctx).run().unwrap().playlist.is_none());

    ws.add_source("02.mp3", b"other track");
    let lists = ws.temp.path().join("lists");
    let mut settings = ws.settings();
    settings.playlist.directory = Some(lists.clone());
    settings.playlist.name_template = "fresh".to_string();
    let reader = FakeReader::default().with("02.mp3", "Artist", "Other", None);
    let ctx = ws.context(settings, reader, FakeProbe::default());
    let report = Organizer::new(&ctx).run().unwrap();

    assert_eq!(report.playlist, Some(lists.join("fresh.m3u")));
    let body = fs::read_to_string(lists.join("fresh.m3u")).unwrap();
    assert!(body.contains("../library/Artist/02.mp3"));
}

#[test]
fn test_rename_source_pass() {
    let ws = Workspace::new();
    ws.add_source("track01.mp3", b"data");

    let mut settings = ws.settings();
    settings.rename_source = true;
    let reader = FakeReader::default()
        .with("track01.mp3", "Artist", "Opening Theme", None)
        .with("Opening Theme.mp3", "Artist", "Opening Theme", None);
    let ctx = ws.context(settings, reader, FakeProbe::default());
    let report = Organizer::new(&ctx).run().unwrap();

    assert_eq!(report.stats.newly_added, 1);
    assert!(ws.library.join("Artist/Opening Theme.mp3").exists());
}

#[test]
fn test_missing_source_is_a_configuration_error() {
    let ws = Workspace::new();
    let mut settings = ws.settings();
    settings.source_dir = ws.temp.path().join("nope");

    let ctx = ws.context(settings, FakeReader::default(), FakeProbe::default());
    let result = Organizer::new(&ctx).run();

    assert!(matches!(result, Err(ImportError::Configuration(_))));
    assert!(!ws.library.exists());
}

#[test]
fn test_io_failure_does_not_stop_later_files() {
    let ws = Workspace::new();
    // A regular file where the artist directory should go
    ws.add_library("Blocked", b"not a directory");
    let blocked = ws.add_source("a.mp3", b"first");
    ws.add_source("b.mp3", b"second");

    let reader = FakeReader::default()
        .with("a.mp3", "Blocked", "First", None)
        .with("b.mp3", "Open", "Second", None);
    let ctx = ws.context(ws.settings(), reader, FakeProbe::default());
    let report = Organizer::new(&ctx).run().unwrap();

    assert_eq!(report.stats.total_files, 2);
    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.newly_added, 1);
    assert!(blocked.exists());
    assert!(ws.library.join("Blocked").is_file());
    assert!(ws.library.join("Open/b.mp3").exists());
    assert_eq!(report.placed.len(), 1);
}
