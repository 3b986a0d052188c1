// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pa gc` - Build directory garbage collection

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use pa_core::SystemClock;
use pa_engine::GarbageCollector;
use tokio_util::sync::CancellationToken;

use crate::env;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct GcArgs {
    #[command(subcommand)]
    pub command: GcCommand,
}

#[derive(Subcommand)]
pub enum GcCommand {
    /// Schedule build directories unused for too long for deletion
    Mark {
        /// Days without a run before a build directory expires
        /// (default: PA_GC_EXPIRATION_DAYS or 30)
        #[arg(long)]
        expiration_days: Option<u64>,
    },
    /// Delete build directories scheduled by `mark`
    Dispose,
}

pub async fn handle(
    command: GcCommand,
    work: PathBuf,
    cancel: CancellationToken,
    format: OutputFormat,
) -> Result<()> {
    match command {
        GcCommand::Mark { expiration_days } => {
            let expiration = env::days(
                expiration_days
                    .or_else(env::gc_expiration_days)
                    .unwrap_or(env::DEFAULT_EXPIRATION_DAYS),
            );
            let summary = tokio::task::spawn_blocking(move || {
                GarbageCollector::new(work, SystemClock).mark_expired(expiration)
            })
            .await??;
            output::print(format, output::mark_text(&summary), output::mark_json(&summary))
        }
        GcCommand::Dispose => {
            let summary = tokio::task::spawn_blocking(move || {
                GarbageCollector::new(work, SystemClock).dispose(&cancel)
            })
            .await??;
            output::print(
                format,
                output::dispose_text(&summary),
                output::dispose_json(&summary),
            )
        }
    }
}

#[cfg(test)]
#[path = "gc_tests.rs"]
mod tests;
