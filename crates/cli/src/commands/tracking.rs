// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pa tracking` - Inspect tracking files

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use pa_core::{Clock, SystemClock};
use pa_storage::TrackingConfigFile;
use serde_json::{json, Value};

use crate::output::OutputFormat;

#[derive(Args)]
pub struct TrackingArgs {
    #[command(subcommand)]
    pub command: TrackingCommand,
}

#[derive(Subcommand)]
pub enum TrackingCommand {
    /// Print a tracking file in the current format
    Show {
        /// Path to a SourceFolder.json or GC record
        file: PathBuf,
    },
}

pub fn handle(command: TrackingCommand, format: OutputFormat) -> Result<()> {
    match command {
        TrackingCommand::Show { file } => {
            let value = show(&file, &SystemClock)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
                OutputFormat::Text => println!("{}", serde_json::to_string_pretty(&value["config"])?),
            }
            Ok(())
        }
    }
}

/// Decoded tracking file. Legacy files are shown converted.
pub fn show(file: &Path, clock: &impl Clock) -> Result<Value> {
    let Some(decoded) = TrackingConfigFile::load(file)? else {
        bail!("{} is not a tracking file", file.display());
    };
    let format = if decoded.is_legacy() { "legacy" } else { "current" };
    let config = serde_json::to_value(decoded.into_current(clock.now()))?;
    Ok(json!({
        "file": file.display().to_string(),
        "format": format,
        "config": config,
    }))
}

#[cfg(test)]
#[path = "tracking_tests.rs"]
mod tests;
