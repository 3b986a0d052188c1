//! Plugin host task dispatch specs

use crate::prelude::*;
use serde_json::json;

fn checkout_context(stage: &str, local_path: &std::path::Path) -> String {
    json!({
        "stage": stage,
        "inputs": { "repository": "self" },
        "repositories": [{
            "alias": "self",
            "id": "self-id",
            "name": "self",
            "type": "git",
            "url": "https://example.com/self.git",
        }],
        "variables": {
            "system.repository.self.localpath": { "value": local_path.to_str().unwrap() },
            "system.accesstoken": { "value": "secret", "isSecret": true },
        },
    })
    .to_string()
}

#[test]
fn checkout_main_prepares_directory_and_reports_it() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("1").join("s");
    let local_str = local.to_str().unwrap();

    plugin_host()
        .args(&["task", "Checkout, pa-plugins"])
        .stdin(&(checkout_context("main", &local) + "\n"))
        .passes()
        .stdout_has(&format!("##[section]Checkout https://example.com/self.git to {local_str}"))
        .stdout_has(&format!(
            "##vso[task.setvariable variable=checkout.self.localpath;]{local_str}"
        ))
        .stderr_empty();

    assert!(local.is_dir());
}

#[test]
fn checkout_pre_and_post_only_log() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("s");

    plugin_host()
        .args(&["task", "Checkout, pa-plugins"])
        .stdin(&checkout_context("pre", &local))
        .passes()
        .stdout_has("Repository 'self' resolves to");
    plugin_host()
        .args(&["task", "Checkout, pa-plugins"])
        .stdin(&checkout_context("post", &local))
        .passes()
        .stdout_has("Checkout of 'self' complete");

    assert!(!local.exists());
}

#[test]
fn failing_task_reports_in_band_and_exits_zero() {
    let input = json!({ "stage": "main", "inputs": { "repository": "tools" } }).to_string();

    plugin_host()
        .args(&["task", "Checkout, pa-plugins"])
        .stdin(&input)
        .passes()
        .stdout_has("##[error]repository 'tools' is not part of this job")
        .stdout_has("##vso[task.complete result=Failed;]");
}

#[test]
fn unknown_entry_point_exits_one() {
    plugin_host()
        .args(&["task", "Deploy, pa-plugins"])
        .stdin("{}")
        .fails()
        .stderr_has("Error:");
}

#[test]
fn missing_arguments_print_usage() {
    plugin_host()
        .fails()
        .stderr_has("usage: pa-plugin-host task|command");
}

#[test]
fn malformed_context_exits_one() {
    plugin_host()
        .args(&["task", "Checkout, pa-plugins"])
        .stdin("{ not json")
        .fails()
        .stderr_has("Error:");
}
