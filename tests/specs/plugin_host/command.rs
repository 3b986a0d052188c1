//! Plugin host logging command dispatch specs

use crate::prelude::*;
use serde_json::json;

#[test]
fn artifact_upload_copies_file_into_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("app.bin");
    std::fs::write(&source, "binary").unwrap();
    let artifacts = dir.path().join("a");
    let input = json!({
        "area": "artifact",
        "event": "upload",
        "properties": { "artifactname": "drop", "containerfolder": "bin" },
        "data": source.to_str().unwrap(),
        "variables": {
            "system.artifactsdirectory": { "value": artifacts.to_str().unwrap() },
        },
    })
    .to_string();

    plugin_host()
        .args(&["command", "ArtifactUpload, pa-plugins"])
        .stdin(&input)
        .passes()
        .stdout_has("Uploaded 1 file(s) to artifact 'drop'")
        .stderr_empty();

    assert_eq!(
        std::fs::read_to_string(artifacts.join("drop").join("bin").join("app.bin")).unwrap(),
        "binary"
    );
}

#[test]
fn artifact_upload_failure_goes_to_stderr_with_exit_zero() {
    let input = json!({ "area": "artifact", "event": "upload", "data": "/tmp/x" }).to_string();

    plugin_host()
        .args(&["command", "ArtifactUpload, pa-plugins"])
        .stdin(&input)
        .passes()
        .stderr_has("artifactname");
}

#[test]
fn task_entry_point_is_not_a_command() {
    plugin_host()
        .args(&["command", "Checkout, pa-plugins"])
        .stdin("{}")
        .fails()
        .stderr_has("Error:");
}

#[test]
fn agent_log_filter_does_not_reach_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("app.bin");
    std::fs::write(&source, "binary").unwrap();
    let input = json!({
        "area": "artifact",
        "event": "upload",
        "properties": { "artifactname": "drop" },
        "data": source.to_str().unwrap(),
        "variables": {
            "system.artifactsdirectory": { "value": dir.path().join("a").to_str().unwrap() },
        },
    })
    .to_string();

    plugin_host()
        .env("RUST_LOG", "debug")
        .args(&["command", "ArtifactUpload, pa-plugins"])
        .stdin(&input)
        .passes()
        .stdout_has("Uploaded 1 file(s) to artifact 'drop'")
        .stderr_empty();
}
