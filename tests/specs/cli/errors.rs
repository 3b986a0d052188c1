//! CLI error handling specs

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["frobnicate"]).fails().stderr_has("unrecognized subcommand");
}

#[test]
fn invalid_agent_settings_fail_with_path() {
    let agent = Agent::new();
    std::fs::write(agent.root().join(".agent"), "{ not json").unwrap();

    agent
        .pa()
        .args(&["gc", "mark"])
        .fails()
        .stderr_has("Error: invalid agent settings")
        .stderr_has(".agent");
}

#[test]
fn tracking_show_of_missing_file_fails() {
    let agent = Agent::new();
    agent
        .pa()
        .args(&["tracking", "show", "/nonexistent/SourceFolder.json"])
        .fails()
        .stderr_has("is not a tracking file");
}
