// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Contexts handed to the plugin host as a single JSON line on stdin.

use pa_core::{RepositoryResource, ServiceEndpoint, Variables};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableValue {
    pub value: String,
    #[serde(default)]
    pub is_secret: bool,
}

impl VariableValue {
    /// Flatten a variable store, keyed by each variable's original spelling.
    pub fn flatten(variables: &Variables) -> BTreeMap<String, VariableValue> {
        variables
            .iter()
            .map(|v| {
                (
                    v.name.clone(),
                    VariableValue {
                        value: v.value.clone(),
                        is_secret: v.secret,
                    },
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginStage {
    Pre,
    Main,
    Post,
}

impl fmt::Display for PluginStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PluginStage::Pre => "pre",
            PluginStage::Main => "main",
            PluginStage::Post => "post",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPluginContext {
    pub stage: PluginStage,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    #[serde(default)]
    pub repositories: Vec<RepositoryResource>,
    #[serde(default)]
    pub endpoints: Vec<ServiceEndpoint>,
    #[serde(default)]
    pub prepend_path: Vec<String>,
    #[serde(default)]
    pub variables: BTreeMap<String, VariableValue>,
    #[serde(default)]
    pub task_variables: BTreeMap<String, VariableValue>,
}

impl TaskPluginContext {
    /// Input value; an empty string counts as unset.
    pub fn input(&self, name: &str) -> Option<&str> {
        lookup(&self.inputs, name).filter(|v| !v.is_empty())
    }

    /// Variable value. Task variables shadow job variables.
    pub fn variable(&self, name: &str) -> Option<&str> {
        lookup_value(&self.task_variables, name).or_else(|| lookup_value(&self.variables, name))
    }

    pub fn repository(&self, alias: &str) -> Option<&RepositoryResource> {
        self.repositories.iter().find(|r| r.alias == alias)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPluginContext {
    pub area: String,
    pub event: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub repositories: Vec<RepositoryResource>,
    #[serde(default)]
    pub endpoints: Vec<ServiceEndpoint>,
    #[serde(default)]
    pub variables: BTreeMap<String, VariableValue>,
}

impl CommandPluginContext {
    pub fn property(&self, name: &str) -> Option<&str> {
        lookup(&self.properties, name).filter(|v| !v.is_empty())
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        lookup_value(&self.variables, name)
    }
}

fn lookup<'a>(map: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

fn lookup_value<'a>(map: &'a BTreeMap<String, VariableValue>, name: &str) -> Option<&'a str> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.value.as_str())
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
