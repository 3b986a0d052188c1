// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pa maintenance` - Garbage collection plus per-definition upkeep

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pa_adapters::SourceProviders;
use pa_core::SystemClock;
use pa_engine::{run_maintenance, MaintenanceOptions};
use tokio_util::sync::CancellationToken;

use crate::env;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct MaintenanceArgs {
    /// Days without a run before a build directory expires
    /// (default: PA_GC_EXPIRATION_DAYS or 30)
    #[arg(long)]
    pub expiration_days: Option<u64>,

    /// Minimum days between maintenance of one definition
    /// (default: PA_MAINTENANCE_DAYS or 1)
    #[arg(long)]
    pub maintenance_days: Option<u64>,
}

impl MaintenanceArgs {
    pub fn options(&self) -> MaintenanceOptions {
        MaintenanceOptions {
            expiration: env::days(
                self.expiration_days
                    .or_else(env::gc_expiration_days)
                    .unwrap_or(env::DEFAULT_EXPIRATION_DAYS),
            ),
            maintenance_interval: env::days(
                self.maintenance_days
                    .or_else(env::maintenance_days)
                    .unwrap_or(env::DEFAULT_MAINTENANCE_DAYS),
            ),
        }
    }
}

pub async fn handle(
    args: MaintenanceArgs,
    work: PathBuf,
    cancel: CancellationToken,
    format: OutputFormat,
) -> Result<()> {
    let options = args.options();
    let summary = tokio::task::spawn_blocking(move || {
        run_maintenance(
            &work,
            &SystemClock,
            &options,
            &SourceProviders::default(),
            &cancel,
        )
    })
    .await??;
    output::print(
        format,
        output::maintenance_text(&summary),
        output::maintenance_json(&summary),
    )
}

#[cfg(test)]
#[path = "maintenance_tests.rs"]
mod tests;
