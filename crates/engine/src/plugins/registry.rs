// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of plugin tasks and logging commands, built from the static
//! plugin table.

use pa_plugins::{
    BuiltinPlugin, PluginEntry, PluginStage, BUILTIN_PLUGINS, CHECKOUT_TASK_ID,
    CHECKOUT_TASK_VERSION, MODULE,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("required plugin task {id}@{version} is not registered")]
    MissingPlugin { id: String, version: String },
    #[error("plugin '{0}' declares no stages")]
    NoStages(String),
}

/// Where the plugin host finds an implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPluginInfo {
    pub module: String,
    pub entry_point: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPluginInfo {
    pub task_id: String,
    pub version: String,
    pub author: String,
    pub description: String,
    pub inputs: Vec<String>,
    pub pre: Option<AgentPluginInfo>,
    pub main: Option<AgentPluginInfo>,
    pub post: Option<AgentPluginInfo>,
}

impl TaskPluginInfo {
    pub fn stage(&self, stage: PluginStage) -> Option<&AgentPluginInfo> {
        match stage {
            PluginStage::Pre => self.pre.as_ref(),
            PluginStage::Main => self.main.as_ref(),
            PluginStage::Post => self.post.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPluginInfo {
    pub area: String,
    pub event: String,
    pub display_name: String,
    pub plugin: AgentPluginInfo,
}

/// Built once per agent process; read-only afterwards.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    tasks: HashMap<(String, String), TaskPluginInfo>,
    commands: HashMap<(String, String), CommandPluginInfo>,
}

impl PluginRegistry {
    /// Registry of the built-in plugins.
    pub fn load() -> Result<Self, RegistryError> {
        Self::from_table(BUILTIN_PLUGINS)
    }

    /// Build a registry from a plugin table. The checkout task is required.
    pub fn from_table(table: &[PluginEntry]) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for entry in table {
            let info = AgentPluginInfo {
                module: MODULE.to_string(),
                entry_point: entry.entry_point.to_string(),
            };
            match entry.plugin {
                BuiltinPlugin::Task(task) => {
                    let stages = task.stages();
                    if stages.is_empty() {
                        return Err(RegistryError::NoStages(entry.entry_point.to_string()));
                    }
                    let at = |stage| stages.contains(&stage).then(|| info.clone());
                    let task_info = TaskPluginInfo {
                        task_id: task.id().to_string(),
                        version: task.version().to_string(),
                        author: task.author().to_string(),
                        description: task.description().to_string(),
                        inputs: task.inputs().iter().map(|i| i.to_string()).collect(),
                        pre: at(PluginStage::Pre),
                        main: at(PluginStage::Main),
                        post: at(PluginStage::Post),
                    };
                    tracing::debug!(
                        task_id = %task_info.task_id,
                        version = %task_info.version,
                        entry_point = entry.entry_point,
                        "registered plugin task",
                    );
                    registry
                        .tasks
                        .insert(task_key(task.id(), task.version()), task_info);
                }
                BuiltinPlugin::Command(command) => {
                    tracing::debug!(
                        area = command.area(),
                        event = command.event(),
                        entry_point = entry.entry_point,
                        "registered plugin command",
                    );
                    registry.commands.insert(
                        command_key(command.area(), command.event()),
                        CommandPluginInfo {
                            area: command.area().to_string(),
                            event: command.event().to_string(),
                            display_name: command.display_name().to_string(),
                            plugin: info,
                        },
                    );
                }
            }
        }

        if registry.task(CHECKOUT_TASK_ID, CHECKOUT_TASK_VERSION).is_none() {
            return Err(RegistryError::MissingPlugin {
                id: CHECKOUT_TASK_ID.to_string(),
                version: CHECKOUT_TASK_VERSION.to_string(),
            });
        }
        Ok(registry)
    }

    pub fn task(&self, task_id: &str, version: &str) -> Option<&TaskPluginInfo> {
        self.tasks.get(&task_key(task_id, version))
    }

    pub fn command(&self, area: &str, event: &str) -> Option<&CommandPluginInfo> {
        self.commands.get(&command_key(area, event))
    }

    pub fn is_task_plugin(&self, task_id: &str, version: &str) -> bool {
        self.task(task_id, version).is_some()
    }

    pub fn is_command_plugin(&self, area: &str, event: &str) -> bool {
        self.command(area, event).is_some()
    }
}

fn task_key(task_id: &str, version: &str) -> (String, String) {
    (task_id.to_ascii_lowercase(), version.to_string())
}

fn command_key(area: &str, event: &str) -> (String, String) {
    (area.to_ascii_lowercase(), event.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
