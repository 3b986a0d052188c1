// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job variables.
//!
//! Variable names are case-insensitive; the first spelling a variable was
//! set with is kept for display and for the plugin wire format.

use std::collections::BTreeMap;

/// A single job variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: String,
    pub secret: bool,
}

/// Case-insensitive variable store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    entries: BTreeMap<String, Variable>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|v| v.value.as_str())
    }

    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.entries.get(&name.to_ascii_lowercase())
    }

    /// Set a public variable. An existing secret stays secret.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name.into(), value.into(), false);
    }

    pub fn set_secret(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name.into(), value.into(), true);
    }

    fn insert(&mut self, name: String, value: String, secret: bool) {
        let key = name.to_ascii_lowercase();
        match self.entries.get_mut(&key) {
            Some(existing) => {
                existing.value = value;
                existing.secret |= secret;
            }
            None => {
                self.entries.insert(key, Variable { name, value, secret });
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.entries.remove(&name.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        for (k, v) in iter {
            vars.set(k, v);
        }
        vars
    }
}

#[cfg(test)]
#[path = "variables_tests.rs"]
mod tests;
