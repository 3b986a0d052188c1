// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    lower = { "system.debug" },
    upper = { "SYSTEM.DEBUG" },
    mixed = { "System.Debug" },
)]
fn lookup_is_case_insensitive(name: &str) {
    let mut vars = Variables::new();
    vars.set("System.Debug", "true");
    assert_eq!(vars.get(name), Some("true"));
}

#[test]
fn first_spelling_is_kept() {
    let mut vars = Variables::new();
    vars.set("Build.Reason", "Manual");
    vars.set("BUILD.REASON", "Schedule");
    let var = vars.get_variable("build.reason").unwrap();
    assert_eq!(var.name, "Build.Reason");
    assert_eq!(var.value, "Schedule");
    assert_eq!(vars.len(), 1);
}

#[test]
fn secret_stays_secret_when_overwritten_publicly() {
    let mut vars = Variables::new();
    vars.set_secret("token", "abc");
    vars.set("token", "def");
    let var = vars.get_variable("token").unwrap();
    assert!(var.secret);
    assert_eq!(var.value, "def");
}

#[test]
fn collect_from_pairs() {
    let mut vars: Variables = [("a", "1"), ("b", "2")].into_iter().collect();
    assert_eq!(vars.get("a"), Some("1"));
    assert_eq!(vars.get("b"), Some("2"));
    assert!(vars.remove("a").is_some());
    assert_eq!(vars.get("a"), None);
}
