// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::tracking::RepositoryTrackingConfig;
use chrono::TimeZone;
use tempfile::tempdir;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap()
}

fn sample() -> TrackingConfig {
    let mut config = TrackingConfig::new(2, "H2", now());
    config.collection_id = "col".to_string();
    config.definition_id = "17".to_string();
    config.definition_name = "CI".to_string();
    config.last_maintenance_attempted_on = Some(now());
    config.resources.repositories.insert(
        "self".to_string(),
        RepositoryTrackingConfig {
            repository_type: "git".to_string(),
            repository_url: "https://example.com/r.git".to_string(),
            source_directory: "2/s".to_string(),
        },
    );
    config
}

#[test]
fn save_then_load_is_identity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("SourceRootMapping/H2/SourceFolder.json");
    let config = sample();

    config.save(&path).unwrap();
    let loaded = TrackingConfigFile::load(&path).unwrap();

    assert_eq!(loaded, Some(TrackingConfigFile::Current(config)));
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn missing_file_is_none() {
    let dir = tempdir().unwrap();
    let loaded = TrackingConfigFile::load(&dir.path().join("nope.json")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn legacy_content_never_loads_as_current() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("SourceFolder.json");
    fs::write(
        &path,
        r#"{"agent_builddirectory": "3", "hashKey": "abc", "repositoryUrl": "https://example.com/x.git"}"#,
    )
    .unwrap();

    let loaded = TrackingConfigFile::load(&path).unwrap().unwrap();
    assert!(loaded.is_legacy());

    let current = loaded.into_current(now());
    assert_eq!(current.build_directory, "3");
    assert_eq!(current.sources_directory, "3/s");
    assert_eq!(current.last_run_on, now());
    assert_eq!(
        current.resources.repositories["self"].repository_url,
        "https://example.com/x.git"
    );
}

#[test]
fn unrecognized_file_is_absent_and_left_in_place() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("SourceFolder.json");
    fs::write(&path, "not a tracking file").unwrap();

    assert!(TrackingConfigFile::load(&path).unwrap().is_none());
    assert!(path.exists());
}

#[test]
fn corrupt_current_file_is_an_error() {
    let err = TrackingConfigFile::decode(r#"{"fileFormatVersion": 3, "agent_"#).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn v2_file_is_migrated_on_load() {
    let content = r#"{
        "fileFormatVersion": 2,
        "agent_builddirectory": "5",
        "build_sourcesdirectory": "5/s",
        "hashKey": "K",
        "lastRunOn": "2026-01-01T00:00:00Z",
        "repositoryType": "git",
        "repositoryUrl": "https://example.com/r.git"
    }"#;
    let Some(TrackingConfigFile::Current(config)) = TrackingConfigFile::decode(content).unwrap()
    else {
        panic!("expected current format");
    };
    assert_eq!(config.file_format_version, CURRENT_FORMAT_VERSION);
    assert_eq!(config.resources.repositories["self"].source_directory, "5/s");
}

#[test]
fn newer_format_is_an_error() {
    let content = r#"{"fileFormatVersion": 99, "agent_builddirectory": "1"}"#;
    let err = TrackingConfigFile::decode(content).unwrap_err();
    assert!(matches!(err, StoreError::Migration(MigrationError::TooNew(99, _))));
}
