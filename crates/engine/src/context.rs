// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job execution context

use crate::plugins::PluginError;
use pa_core::{
    AgentSettings, DropResource, OutputSink, RepositoryResource, ServiceEndpoint, TracingSink,
    Variables,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A logging command running in the background.
pub(crate) struct AsyncCommand {
    pub name: String,
    pub handle: JoinHandle<Result<(), PluginError>>,
}

/// Everything the workspace core and plugin engine read from a running job.
///
/// Resources are supplied by the job definition. The core only writes back
/// the `system.repository.*` and `system.build.*` variables.
pub struct ExecutionContext {
    pub settings: AgentSettings,
    pub variables: Variables,
    pub task_variables: Variables,
    pub repositories: Vec<RepositoryResource>,
    pub drops: Vec<DropResource>,
    pub endpoints: Vec<ServiceEndpoint>,
    pub prepend_path: Vec<String>,
    pub cancel: CancellationToken,
    output: Arc<dyn OutputSink>,
    async_commands: Vec<AsyncCommand>,
}

impl ExecutionContext {
    pub fn new(settings: AgentSettings) -> Self {
        Self {
            settings,
            variables: Variables::new(),
            task_variables: Variables::new(),
            repositories: Vec::new(),
            drops: Vec::new(),
            endpoints: Vec::new(),
            prepend_path: Vec::new(),
            cancel: CancellationToken::new(),
            output: Arc::new(TracingSink),
            async_commands: Vec::new(),
        }
    }

    pub fn with_output(mut self, output: Arc<dyn OutputSink>) -> Self {
        self.output = output;
        self
    }

    pub fn with_repository(mut self, repository: RepositoryResource) -> Self {
        self.repositories.push(repository);
        self
    }

    pub fn with_drop(mut self, drop: DropResource) -> Self {
        self.drops.push(drop);
        self
    }

    pub fn with_endpoint(mut self, endpoint: ServiceEndpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn output(&self) -> Arc<dyn OutputSink> {
        Arc::clone(&self.output)
    }

    pub fn repository(&self, alias: &str) -> Option<&RepositoryResource> {
        self.repositories.iter().find(|r| r.alias == alias)
    }

    /// Whether a hosted agent must pin the build directory to its agent id.
    ///
    /// Legacy version control clients key their local mappings by machine,
    /// which hosted images share.
    pub fn requires_hosted_override(&self) -> bool {
        self.settings.is_hosted
            && self.repositories.iter().any(|r| r.is_legacy_vcs())
    }

    pub(crate) fn push_async_command(&mut self, command: AsyncCommand) {
        self.async_commands.push(command);
    }

    pub(crate) fn take_async_commands(&mut self) -> Vec<AsyncCommand> {
        std::mem::take(&mut self.async_commands)
    }

    pub fn pending_async_commands(&self) -> usize {
        self.async_commands.len()
    }
}
