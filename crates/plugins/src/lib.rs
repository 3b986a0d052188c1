// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pa-plugins: out-of-process plugins and the wire types shared with the agent
//!
//! Plugins are listed in [`BUILTIN_PLUGINS`] and resolved by entry point. The
//! agent introspects the same table to build its registry.

mod artifact;
mod checkout;
pub mod host;
pub mod wire;

use std::io::Write;
use thiserror::Error;

pub use artifact::ArtifactUploadCommand;
pub use checkout::{CheckoutTask, CHECKOUT_TASK_ID, CHECKOUT_TASK_VERSION};
pub use pa_core::LoggingCommand;
pub use wire::{CommandPluginContext, PluginStage, TaskPluginContext, VariableValue};

/// Module name the host resolves entry points in.
pub const MODULE: &str = "pa-plugins";

/// Failure of a plugin's own work, as opposed to a host error.
#[derive(Debug, Error)]
pub enum PluginFailure {
    #[error("required input '{0}' is missing")]
    MissingInput(String),
    #[error("required variable '{0}' is missing")]
    MissingVariable(String),
    #[error("repository '{0}' is not part of this job")]
    UnknownRepository(String),
    #[error("artifact destination {to} is inside its source {from}")]
    DestinationInsideSource { from: String, to: String },
    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A task implemented out of process.
pub trait TaskPlugin: Send + Sync {
    fn id(&self) -> &'static str;
    fn version(&self) -> &'static str;
    fn author(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn inputs(&self) -> &'static [&'static str];
    /// Stages the task runs in. A task must declare at least one.
    fn stages(&self) -> &'static [PluginStage];

    fn run(&self, ctx: &TaskPluginContext, out: &mut dyn Write) -> Result<(), PluginFailure>;
}

/// A logging command implemented out of process.
pub trait CommandPlugin: Send + Sync {
    fn area(&self) -> &'static str;
    fn event(&self) -> &'static str;
    fn display_name(&self) -> &'static str;

    fn run(&self, ctx: &CommandPluginContext, out: &mut dyn Write) -> Result<(), PluginFailure>;
}

#[derive(Clone, Copy)]
pub enum BuiltinPlugin {
    Task(&'static dyn TaskPlugin),
    Command(&'static dyn CommandPlugin),
}

#[derive(Clone, Copy)]
pub struct PluginEntry {
    pub entry_point: &'static str,
    pub plugin: BuiltinPlugin,
}

pub static BUILTIN_PLUGINS: &[PluginEntry] = &[
    PluginEntry {
        entry_point: "Checkout",
        plugin: BuiltinPlugin::Task(&CheckoutTask),
    },
    PluginEntry {
        entry_point: "ArtifactUpload",
        plugin: BuiltinPlugin::Command(&ArtifactUploadCommand),
    },
];

/// Look up a built-in plugin by entry point.
pub fn find(entry_point: &str) -> Option<&'static PluginEntry> {
    BUILTIN_PLUGINS.iter().find(|e| e.entry_point == entry_point)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
