//! Two-phase garbage collection specs

use crate::prelude::*;

const LONG_AGO: &str = "2020-01-01T00:00:00Z";

fn gc_records(agent: &Agent) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(agent.work().join("SourceRootMapping/GC")) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn mark_moves_expired_tracking_file_to_gc() {
    let agent = Agent::new();
    let file = agent.tracking_file("stale", 1, LONG_AGO);

    agent
        .pa()
        .args(&["gc", "mark", "--expiration-days", "30"])
        .passes()
        .stdout_eq("Marked 1 of 1 tracking file(s) for deletion (0 failed)\n");

    assert!(!file.exists());
    let records = gc_records(&agent);
    assert_eq!(records.len(), 1);
    let record: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&records[0]).unwrap()).unwrap();
    assert_eq!(record["agent_builddirectory"], "1");
    assert!(agent.work().join("1").is_dir());
}

#[test]
fn dispose_deletes_scheduled_build_directories() {
    let agent = Agent::new();
    agent.tracking_file("stale", 1, LONG_AGO);
    agent.pa().args(&["gc", "mark"]).passes();

    let result = agent.pa().args(&["-o", "json", "gc", "dispose"]).passes();

    assert_eq!(result.json()["disposed"], 1);
    assert!(!agent.work().join("1").exists());
    assert!(gc_records(&agent).is_empty());
}

#[test]
fn recent_definitions_survive() {
    let agent = Agent::new();
    let file = agent.tracking_file("fresh", 2, &chrono::Utc::now().to_rfc3339());

    agent.pa().args(&["gc", "mark", "--expiration-days", "30"]).passes();
    agent.pa().args(&["gc", "dispose"]).passes();

    assert!(file.exists());
    assert!(agent.work().join("2").is_dir());
}

#[test]
fn legacy_tracking_file_is_always_collected() {
    let agent = Agent::new();
    agent.work_dir("5/s");
    let file = agent.work_file(
        "SourceRootMapping/legacy/SourceFolder.json",
        r#"{ "agent_builddirectory": "5", "system": "build" }"#,
    );

    agent.pa().args(&["gc", "mark", "--expiration-days", "3650"]).passes();
    agent.pa().args(&["gc", "dispose"]).passes();

    assert!(!file.exists());
    assert!(!agent.work().join("5").exists());
}

#[test]
fn work_dir_env_overrides_agent_root() {
    let agent = Agent::new();
    let other = tempfile::tempdir().unwrap();
    let file = other.path().join("SourceRootMapping/x/SourceFolder.json");
    std::fs::create_dir_all(file.parent().unwrap()).unwrap();
    std::fs::write(&file, current_tracking_json(1, "x", LONG_AGO)).unwrap();

    agent
        .pa()
        .env("PA_WORK_DIR", other.path())
        .args(&["gc", "mark"])
        .passes();

    assert!(!file.exists());
}
