// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::error::ErrorKind;
use clap::FromArgMatches;

use super::{cli_command, format_error, Cli, Commands};
use crate::commands::gc::GcCommand;
use crate::output::OutputFormat;

fn parse(args: &[&str]) -> Cli {
    let matches = cli_command().try_get_matches_from(args).unwrap();
    Cli::from_arg_matches(&matches).unwrap()
}

#[test]
fn version_flag() {
    let err = cli_command()
        .try_get_matches_from(["pa", "--version"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn maintenance_flags() {
    let cli = parse(&["pa", "maintenance", "--expiration-days", "14", "--maintenance-days", "2"]);
    let Some(Commands::Maintenance(args)) = cli.command else {
        panic!("expected maintenance");
    };
    assert_eq!(args.expiration_days, Some(14));
    assert_eq!(args.maintenance_days, Some(2));
}

#[test]
fn gc_subcommands() {
    let cli = parse(&["pa", "gc", "mark", "--expiration-days", "7"]);
    let Some(Commands::Gc(args)) = cli.command else {
        panic!("expected gc");
    };
    assert!(matches!(args.command, GcCommand::Mark { expiration_days: Some(7) }));

    let cli = parse(&["pa", "-o", "json", "gc", "dispose"]);
    assert_eq!(cli.output, OutputFormat::Json);
    assert!(matches!(
        cli.command,
        Some(Commands::Gc(args)) if matches!(args.command, GcCommand::Dispose)
    ));
}

#[test]
fn tracking_show_requires_file() {
    let err = cli_command()
        .try_get_matches_from(["pa", "tracking", "show"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn negative_days_are_rejected() {
    assert!(cli_command()
        .try_get_matches_from(["pa", "gc", "mark", "--expiration-days", "-1"])
        .is_err());
}

#[test]
fn error_chain_is_deduplicated() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err = anyhow::Error::new(io).context("reading tracking file");
    assert_eq!(
        format_error(&err),
        "reading tracking file\n\nCaused by:\n    0: gone"
    );

    let err = anyhow::anyhow!("plain failure");
    assert_eq!(format_error(&err), "plain failure");
}
