// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin host dispatch: `pa-plugin-host task|command "<entry point>, <module>"`

use crate::wire::{CommandPluginContext, TaskPluginContext};
use crate::{find, BuiltinPlugin, LoggingCommand, MODULE};
use std::io::Write;
use thiserror::Error;

/// Errors that prevent the host from running a plugin at all.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("unknown plugin kind '{0}', expected 'task' or 'command'")]
    UnknownKind(String),
    #[error("malformed plugin target '{0}', expected \"<entry point>, <module>\"")]
    MalformedTarget(String),
    #[error("module '{0}' is not available in this host")]
    UnknownModule(String),
    #[error("no {kind} plugin with entry point '{entry_point}'")]
    UnknownEntryPoint { kind: &'static str, entry_point: String },
    #[error("invalid plugin context: {0}")]
    Context(#[from] serde_json::Error),
    #[error("failed to write plugin output: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Task,
    Command,
}

impl std::str::FromStr for Kind {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task" => Ok(Kind::Task),
            "command" => Ok(Kind::Command),
            other => Err(HostError::UnknownKind(other.to_string())),
        }
    }
}

/// Split `"<entry point>, <module>"` and check the module is this one.
pub fn parse_target(target: &str) -> Result<&str, HostError> {
    let (entry_point, module) = target
        .split_once(',')
        .ok_or_else(|| HostError::MalformedTarget(target.to_string()))?;
    let (entry_point, module) = (entry_point.trim(), module.trim());
    if entry_point.is_empty() {
        return Err(HostError::MalformedTarget(target.to_string()));
    }
    if module != MODULE {
        return Err(HostError::UnknownModule(module.to_string()));
    }
    Ok(entry_point)
}

/// Run one plugin against the JSON context in `input`.
///
/// Plugin failures are reported in-band and are not errors: a failed task
/// writes `##[error]` plus a `task.complete result=Failed` command to `out`, a
/// failed command writes its message to `err`.
pub fn dispatch(
    kind: Kind,
    target: &str,
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), HostError> {
    let entry_point = parse_target(target)?;
    let entry = find(entry_point);
    match (kind, entry.map(|e| e.plugin)) {
        (Kind::Task, Some(BuiltinPlugin::Task(task))) => {
            let ctx: TaskPluginContext = serde_json::from_str(input.trim())?;
            tracing::debug!(entry_point, stage = %ctx.stage, "running task plugin");
            if let Err(e) = task.run(&ctx, out) {
                tracing::warn!(entry_point, error = %e, "task plugin failed");
                writeln!(out, "##[error]{e}")?;
                let complete = LoggingCommand::new("task", "complete")
                    .property("result", "Failed")
                    .data(e.to_string());
                writeln!(out, "{complete}")?;
            }
            Ok(())
        }
        (Kind::Command, Some(BuiltinPlugin::Command(command))) => {
            let ctx: CommandPluginContext = serde_json::from_str(input.trim())?;
            tracing::debug!(entry_point, area = %ctx.area, event = %ctx.event, "running command plugin");
            if let Err(e) = command.run(&ctx, out) {
                tracing::warn!(entry_point, error = %e, "command plugin failed");
                writeln!(err, "{e}")?;
            }
            Ok(())
        }
        (kind, _) => Err(HostError::UnknownEntryPoint {
            kind: match kind {
                Kind::Task => "task",
                Kind::Command => "command",
            },
            entry_point: entry_point.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
