// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-band logging commands (`##vso[area.event key=value;]data`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const PREFIX: &str = "##vso[";

/// A directive emitted on a step's output stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingCommand {
    pub area: String,
    pub event: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub data: String,
}

impl LoggingCommand {
    pub fn new(area: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            event: event.into(),
            properties: BTreeMap::new(),
            data: String::new(),
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// `area.event`, used in log messages and errors.
    pub fn name(&self) -> String {
        format!("{}.{}", self.area, self.event)
    }
}

fn escape_property(value: &str) -> String {
    value
        .replace('%', "%AZP25")
        .replace(';', "%3B")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
        .replace(']', "%5D")
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

impl fmt::Display for LoggingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}.{}", self.area, self.event)?;
        if !self.properties.is_empty() {
            write!(f, " ")?;
            for (k, v) in &self.properties {
                write!(f, "{}={};", k, escape_property(v))?;
            }
        }
        write!(f, "]{}", escape_data(&self.data))
    }
}

#[cfg(test)]
#[path = "logging_command_tests.rs"]
mod tests;
