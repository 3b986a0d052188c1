// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pa - pipeline agent workspace maintenance CLI

mod commands;
mod env;
mod output;

use output::OutputFormat;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{gc, maintenance, tracking};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(
    name = "pa",
    version,
    about = "Pipeline agent - build workspace tracking and maintenance"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Garbage-collect expired build directories, then maintain the rest
    Maintenance(maintenance::MaintenanceArgs),
    /// Two-phase build directory garbage collection
    Gc(gc::GcArgs),
    /// Tracking file inspection
    Tracking(tracking::TrackingArgs),
}

fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() {
    setup_logging();
    if let Err(e) = run().await {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped. Otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

/// Cancellation token that fires on Ctrl-C.
fn interrupt_token() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, stopping after the current entry");
            token.cancel();
        }
    });
    cancel
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        cli_command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Tracking(args) => tracking::handle(args.command, format),
        Commands::Gc(args) => {
            let work = env::work_dir()?;
            tracing::info!(work = %work.display(), "garbage collection");
            gc::handle(args.command, work, interrupt_token(), format).await
        }
        Commands::Maintenance(args) => {
            let work = env::work_dir()?;
            tracing::info!(work = %work.display(), "maintenance");
            maintenance::handle(args, work, interrupt_token(), format).await
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
