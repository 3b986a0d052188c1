// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{DropResource, RepositoryResource};

/// Git repository resource with a URL derived from the alias.
pub fn git_repo(alias: &str) -> RepositoryResource {
    let mut repo = RepositoryResource::new(alias, "git", format!("https://example.com/{alias}.git"));
    repo.id = format!("{alias}-id");
    repo
}

/// Git repository resource with an explicit URL.
pub fn git_repo_at(alias: &str, url: &str) -> RepositoryResource {
    let mut repo = git_repo(alias);
    repo.url = url.to_string();
    repo
}

/// Build drop resource.
pub fn build_drop(alias: &str, version: &str) -> DropResource {
    DropResource::new(alias, "Build", version)
}
