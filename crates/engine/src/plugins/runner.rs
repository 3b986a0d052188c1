// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launches the plugin host for task stages and logging commands.

use super::registry::PluginRegistry;
use crate::context::{AsyncCommand, ExecutionContext};
use pa_adapters::{CancelMode, HostError, HostInvocation, HostKind, OutputLine};
use pa_core::{LoggingCommand, OutputSink};
use pa_plugins::{CommandPluginContext, PluginStage, TaskPluginContext, VariableValue};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("`{command_line}` exited with code {code}")]
    ExitCode { code: i32, command_line: String },
    #[error("{command} reported an error: {message}")]
    Stderr { command: String, message: String },
    #[error("logging command '{0}' is not supported by any plugin")]
    NotSupported(String),
    #[error("no plugin task {id}@{version}")]
    UnknownTask { id: String, version: String },
    #[error("plugin task {id}@{version} has no {stage} stage")]
    MissingStage {
        id: String,
        version: String,
        stage: PluginStage,
    },
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("failed to encode plugin context: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{command} did not complete: {reason}")]
    Join { command: String, reason: String },
}

pub struct PluginRunner {
    registry: Arc<PluginRegistry>,
    host: PathBuf,
}

impl PluginRunner {
    pub fn new(registry: Arc<PluginRegistry>, host: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            host: host.into(),
        }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Run one stage of a plugin task to completion.
    ///
    /// Host output on both streams goes to `sink` as it arrives. Job
    /// cancellation interrupts the host and waits for it to exit.
    pub async fn run_task(
        &self,
        ctx: &ExecutionContext,
        task_id: &str,
        version: &str,
        inputs: BTreeMap<String, String>,
        stage: PluginStage,
        sink: &dyn OutputSink,
    ) -> Result<(), PluginError> {
        let task = self
            .registry
            .task(task_id, version)
            .ok_or_else(|| PluginError::UnknownTask {
                id: task_id.to_string(),
                version: version.to_string(),
            })?;
        let plugin = task.stage(stage).ok_or_else(|| PluginError::MissingStage {
            id: task_id.to_string(),
            version: version.to_string(),
            stage,
        })?;

        let input = serde_json::to_string(&TaskPluginContext {
            stage,
            inputs,
            repositories: ctx.repositories.clone(),
            endpoints: ctx.endpoints.clone(),
            prepend_path: ctx.prepend_path.clone(),
            variables: VariableValue::flatten(&ctx.variables),
            task_variables: VariableValue::flatten(&ctx.task_variables),
        })?;
        let invocation =
            HostInvocation::new(&self.host, HostKind::Task, &plugin.entry_point, &plugin.module);

        let outcome = invocation
            .run(&input, &ctx.cancel, CancelMode::Interrupt, |line| match line {
                OutputLine::Stdout(line) | OutputLine::Stderr(line) => sink.write_line(&line),
            })
            .await?;
        if !outcome.success() {
            return Err(PluginError::ExitCode {
                code: outcome.exit_code,
                command_line: invocation.command_line(),
            });
        }
        Ok(())
    }

    /// Start a logging command in the background.
    ///
    /// The running command is recorded on `ctx`; collect it with
    /// [`PluginRunner::wait_async_commands`]. Must be called from within a
    /// tokio runtime.
    pub fn run_command(
        &self,
        ctx: &mut ExecutionContext,
        command: LoggingCommand,
    ) -> Result<(), PluginError> {
        let name = command.name();
        let info = self
            .registry
            .command(&command.area, &command.event)
            .ok_or_else(|| PluginError::NotSupported(name.clone()))?;

        let input = serde_json::to_string(&CommandPluginContext {
            area: command.area,
            event: command.event,
            properties: command.properties,
            data: command.data,
            repositories: ctx.repositories.clone(),
            endpoints: ctx.endpoints.clone(),
            variables: VariableValue::flatten(&ctx.variables),
        })?;
        let invocation = HostInvocation::new(
            &self.host,
            HostKind::Command,
            &info.plugin.entry_point,
            &info.plugin.module,
        );
        let display_name = info.display_name.clone();
        let output = ctx.output();
        let cancel = ctx.cancel.clone();

        tracing::info!(command = %name, "starting logging command");
        let handle = tokio::spawn(async move {
            let mut stderr = Vec::new();
            let outcome = invocation
                .run(&input, &cancel, CancelMode::Kill, |line| match line {
                    OutputLine::Stdout(line) => output.write_line(&line),
                    OutputLine::Stderr(line) => stderr.push(line),
                })
                .await?;

            if !outcome.success() {
                for line in &stderr {
                    output.error(line);
                }
                return Err(PluginError::ExitCode {
                    code: outcome.exit_code,
                    command_line: invocation.command_line(),
                });
            }
            if !stderr.is_empty() {
                return Err(PluginError::Stderr {
                    command: display_name,
                    message: stderr.join("\n"),
                });
            }
            Ok(())
        });

        ctx.push_async_command(AsyncCommand { name, handle });
        Ok(())
    }

    /// Wait for every background logging command started on `ctx`.
    ///
    /// All failures are reported to the job output; the first is returned.
    pub async fn wait_async_commands(&self, ctx: &mut ExecutionContext) -> Result<(), PluginError> {
        let output = ctx.output();
        let mut first = None;
        for command in ctx.take_async_commands() {
            let result = match command.handle.await {
                Ok(result) => result,
                Err(e) => Err(PluginError::Join {
                    command: command.name.clone(),
                    reason: e.to_string(),
                }),
            };
            if let Err(e) = result {
                tracing::warn!(command = %command.name, error = %e, "logging command failed");
                output.error(&e.to_string());
                first.get_or_insert(e);
            }
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(all(test, unix))]
#[path = "runner_tests.rs"]
mod tests;
