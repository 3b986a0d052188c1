//! Tracking file inspection specs

use crate::prelude::*;

#[test]
fn show_prints_current_config() {
    let agent = Agent::new();
    let file = agent.tracking_file("abc", 4, "2026-03-01T12:00:00Z");

    let result = agent
        .pa()
        .args(&["tracking", "show", file.to_str().unwrap()])
        .passes();

    let config = result.json();
    assert_eq!(config["agent_builddirectory"], "4");
    assert_eq!(config["hashKey"], "abc");
    assert_eq!(
        config["resources"]["repositories"]["self"]["sourceDirectory"],
        "4/s"
    );
}

#[test]
fn show_converts_legacy_without_rewriting() {
    let agent = Agent::new();
    let legacy = r#"{ "agent_builddirectory": "C:\agent\_work\7", "hashKey": "k" }"#;
    let file = agent.work_file("SourceRootMapping/k/SourceFolder.json", legacy);

    let result = agent
        .pa()
        .args(&["-o", "json", "tracking", "show", file.to_str().unwrap()])
        .passes();

    let value = result.json();
    assert_eq!(value["format"], "legacy");
    assert_eq!(value["config"]["fileFormatVersion"], 3);
    assert_eq!(value["config"]["agent_builddirectory"], r"C:\agent\_work\7");
    assert_eq!(std::fs::read_to_string(&file).unwrap(), legacy);
}

#[test]
fn show_migrates_older_current_format() {
    let agent = Agent::new();
    let v2 = serde_json::json!({
        "fileFormatVersion": 2,
        "agent_builddirectory": "3",
        "build_sourcesdirectory": "3/s",
        "repositoryType": "git",
        "repositoryUrl": "https://example.com/r.git",
        "lastRunOn": "2026-01-01T00:00:00Z",
    });
    let file = agent.work_file("SourceRootMapping/v2/SourceFolder.json", &v2.to_string());

    let config = agent
        .pa()
        .args(&["tracking", "show", file.to_str().unwrap()])
        .passes()
        .json();

    assert_eq!(config["fileFormatVersion"], 3);
    assert_eq!(
        config["resources"]["repositories"]["self"]["repositoryUrl"],
        "https://example.com/r.git"
    );
}
