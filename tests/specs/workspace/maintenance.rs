//! Maintenance job specs

use crate::prelude::*;

#[test]
fn maintenance_collects_and_stamps() {
    let agent = Agent::new();
    let stale = agent.tracking_file("stale", 1, "2020-01-01T00:00:00Z");
    let fresh = agent.tracking_file("fresh", 2, &chrono::Utc::now().to_rfc3339());

    let result = agent
        .pa()
        .args(&["-o", "json", "maintenance", "--expiration-days", "30"])
        .passes();

    let summary = result.json();
    assert_eq!(summary["mark"]["marked"], 1);
    assert_eq!(summary["dispose"]["disposed"], 1);
    assert_eq!(summary["maintained"], 1);
    assert!(!stale.exists());
    assert!(!agent.work().join("1").exists());

    let config: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&fresh).unwrap()).unwrap();
    assert!(config["lastMaintenanceAttemptedOn"].is_string());
    assert!(config["lastMaintenanceCompletedOn"].is_string());
}

#[test]
fn maintenance_respects_interval() {
    let agent = Agent::new();
    agent.tracking_file("fresh", 1, &chrono::Utc::now().to_rfc3339());

    let first = agent.pa().args(&["-o", "json", "maintenance"]).passes().json();
    let second = agent.pa().args(&["-o", "json", "maintenance"]).passes().json();

    assert_eq!(first["maintained"], 1);
    assert_eq!(second["maintained"], 0);
}

#[test]
fn maintenance_of_empty_root_is_a_no_op() {
    let agent = Agent::new();
    agent
        .pa()
        .args(&["maintenance"])
        .passes()
        .stdout_has("Maintained 0 definition(s) (0 failed)");
}
