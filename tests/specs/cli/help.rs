//! CLI help specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: pa")
        .stdout_has("maintenance")
        .stdout_has("gc")
        .stdout_has("tracking");
}

#[test]
fn gc_help_lists_phases() {
    cli()
        .args(&["gc", "--help"])
        .passes()
        .stdout_has("mark")
        .stdout_has("dispose");
}

#[test]
fn maintenance_help_lists_retention_flags() {
    cli()
        .args(&["maintenance", "--help"])
        .passes()
        .stdout_has("--expiration-days")
        .stdout_has("--maintenance-days");
}
