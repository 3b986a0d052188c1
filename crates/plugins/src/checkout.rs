// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkout task
//!
//! Prepares the local directory the agent assigned to a repository and
//! reports it back in-band. Fetching the repository content is the job of
//! the source provider for its type.

use crate::wire::{PluginStage, TaskPluginContext};
use crate::{LoggingCommand, PluginFailure, TaskPlugin};
use pa_core::SELF_ALIAS;
use std::fs;
use std::io::Write;
use std::path::Path;

pub const CHECKOUT_TASK_ID: &str = "6d15af64-176c-496d-b583-fd2ae21d4df4";
pub const CHECKOUT_TASK_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutTask;

impl TaskPlugin for CheckoutTask {
    fn id(&self) -> &'static str {
        CHECKOUT_TASK_ID
    }

    fn version(&self) -> &'static str {
        CHECKOUT_TASK_VERSION
    }

    fn author(&self) -> &'static str {
        "Alfred Jean LLC"
    }

    fn description(&self) -> &'static str {
        "Prepare a repository directory for the job"
    }

    fn inputs(&self) -> &'static [&'static str] {
        &["repository", "clean"]
    }

    fn stages(&self) -> &'static [PluginStage] {
        &[PluginStage::Pre, PluginStage::Main, PluginStage::Post]
    }

    fn run(&self, ctx: &TaskPluginContext, out: &mut dyn Write) -> Result<(), PluginFailure> {
        let alias = ctx.input("repository").unwrap_or(SELF_ALIAS);
        let repo = ctx
            .repository(alias)
            .ok_or_else(|| PluginFailure::UnknownRepository(alias.to_string()))?;
        let local_path_var = format!("system.repository.{alias}.localpath");
        let local_path = ctx
            .variable(&local_path_var)
            .ok_or_else(|| PluginFailure::MissingVariable(local_path_var.clone()))?;
        let path = Path::new(local_path);

        match ctx.stage {
            PluginStage::Pre => {
                write_line(out, &format!("Repository '{alias}' resolves to {local_path}"))?;
            }
            PluginStage::Main => {
                let clean = ctx
                    .input("clean")
                    .map(|v| v.eq_ignore_ascii_case("true"))
                    .unwrap_or(repo.clean);
                if clean && path.exists() {
                    write_line(out, &format!("Cleaning {local_path}"))?;
                    fs::remove_dir_all(path).map_err(|source| PluginFailure::Io {
                        op: "clean",
                        path: local_path.to_string(),
                        source,
                    })?;
                }
                fs::create_dir_all(path).map_err(|source| PluginFailure::Io {
                    op: "create",
                    path: local_path.to_string(),
                    source,
                })?;
                write_line(out, &format!("##[section]Checkout {} to {local_path}", repo.url))?;
                let command = LoggingCommand::new("task", "setvariable")
                    .property("variable", format!("checkout.{alias}.localpath"))
                    .data(local_path);
                write_line(out, &command.to_string())?;
            }
            PluginStage::Post => {
                write_line(out, &format!("Checkout of '{alias}' complete"))?;
            }
        }
        Ok(())
    }
}

fn write_line(out: &mut dyn Write, line: &str) -> Result<(), PluginFailure> {
    writeln!(out, "{line}").map_err(|source| PluginFailure::Io {
        op: "write",
        path: "stdout".to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "checkout_tests.rs"]
mod tests;
