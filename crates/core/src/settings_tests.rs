// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = AgentSettings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
    assert_eq!(settings, AgentSettings::default());
}

#[test]
fn parses_camel_case_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(
        &path,
        r#"{"agentId": 42, "agentName": "hosted-7", "poolId": 3, "workFolder": "_work", "isHosted": true}"#,
    )
    .unwrap();

    let settings = AgentSettings::load(&path).unwrap();
    assert_eq!(settings.agent_id, 42);
    assert_eq!(settings.agent_name, "hosted-7");
    assert_eq!(settings.work_folder, "_work");
    assert!(settings.is_hosted);
}

#[test]
fn invalid_json_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, "{ not json").unwrap();

    let err = AgentSettings::load(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Json { .. }));
}
