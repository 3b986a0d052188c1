// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Out-of-process plugin tasks and logging commands

mod registry;
mod runner;

pub use registry::{
    AgentPluginInfo, CommandPluginInfo, PluginRegistry, RegistryError, TaskPluginInfo,
};
pub use runner::{PluginError, PluginRunner};
