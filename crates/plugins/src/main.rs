// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pa-plugin-host - runs one built-in plugin per process
//!
//! Usage: `pa-plugin-host task|command "<entry point>, <module>"`, with the
//! plugin context as one JSON line on stdin. Stdout is the job log channel;
//! diagnostics go to stderr.

use anyhow::{bail, Context, Result};
use pa_plugins::host::{dispatch, Kind};
use std::io::Read;

const LOG_ENV: &str = "PA_PLUGIN_HOST_LOG";

fn main() {
    setup_logging();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Not RUST_LOG: the agent's filter is inherited, and any stderr output
    // fails a command plugin.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [kind, target] = args.as_slice() else {
        bail!("usage: pa-plugin-host task|command \"<entry point>, <module>\"");
    };
    let kind: Kind = kind.parse()?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read plugin context from stdin")?;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    dispatch(kind, target, &input, &mut stdout.lock(), &mut stderr.lock())?;
    Ok(())
}
