// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Legacy tracking files.
//!
//! Older agents wrote a loose JSON-like file without a format version. Some
//! of those files are not valid JSON (unescaped Windows paths, `=` instead of
//! `:`, truncated writes), so they are read with a recovery parser that keeps
//! whatever `"key": value` pairs it can find.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(\w+)"\s*[:=]\s*(?:"([^"]*)"|(-?\d+))"#).expect("constant regex pattern is valid")
});

/// Legacy tracking record. Only the build directory is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTrackingConfig {
    pub build_directory: String,
    pub system: Option<String>,
    pub collection_id: Option<String>,
    pub definition_id: Option<String>,
    pub hash_key: Option<String>,
    pub repository_url: Option<String>,
}

impl LegacyTrackingConfig {
    /// Extract the recognizable fields from `content`.
    ///
    /// Returns `None` when no build directory can be recovered, either from
    /// `agent_builddirectory` or from the first segment of
    /// `build_sourcesdirectory`.
    pub fn try_parse(content: &str) -> Option<Self> {
        let mut fields: HashMap<String, String> = HashMap::new();
        for caps in FIELD_PATTERN.captures_iter(content) {
            let Some(key) = caps.get(1) else {
                continue;
            };
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().replace("\\\\", "\\"))
                .unwrap_or_default();
            fields.entry(key.as_str().to_string()).or_insert(value);
        }

        let build_directory = fields
            .get("agent_builddirectory")
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .or_else(|| {
                fields
                    .get("build_sourcesdirectory")
                    .and_then(|s| s.split(['/', '\\']).find(|p| !p.is_empty()))
                    .map(str::to_string)
            })?;

        let take = |key: &str| fields.get(key).filter(|v| !v.is_empty()).cloned();
        Some(Self {
            build_directory,
            system: take("system"),
            collection_id: take("collectionId"),
            definition_id: take("definitionId"),
            hash_key: take("hashKey"),
            repository_url: take("repositoryUrl"),
        })
    }
}

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;
