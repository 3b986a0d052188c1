//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the `pa` and `pa-plugin-host` binaries
//! against a throwaway agent root.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR points at a different target directory.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

pub fn pa_binary() -> PathBuf {
    binary_path("pa")
}

pub fn plugin_host_binary() -> PathBuf {
    binary_path("pa-plugin-host")
}

/// Fluent builder for one binary invocation
pub struct CliBuilder {
    program: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    stdin: Option<String>,
}

/// Create a builder for `pa`
pub fn cli() -> CliBuilder {
    CliBuilder::new(pa_binary())
}

/// Create a builder for `pa-plugin-host`
pub fn plugin_host() -> CliBuilder {
    CliBuilder::new(plugin_host_binary())
}

impl CliBuilder {
    fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            envs: vec![("RUST_LOG".into(), "warn".into())],
            stdin: None,
        }
    }

    /// Add arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Feed `input` on stdin, then close it
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    fn output(self) -> Output {
        let mut cmd = assert_cmd::Command::new(&self.program);
        cmd.args(&self.args);
        for var in ["PA_WORK_DIR", "PA_ROOT", "PA_GC_EXPIRATION_DAYS", "PA_MAINTENANCE_DAYS"] {
            cmd.env_remove(var);
        }
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.output().expect("command should run")
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.output();
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.output();
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be JSON")
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Assert stderr is empty.
    pub fn stderr_empty(self) -> Self {
        let stderr = self.stderr();
        assert!(stderr.is_empty(), "stderr should be empty\nstderr: {}", stderr);
        self
    }
}

// =============================================================================
// Agent root
// =============================================================================

/// Temporary agent root with a `_work` directory.
pub struct Agent {
    dir: tempfile::TempDir,
}

impl Agent {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn work(&self) -> PathBuf {
        self.root().join("_work")
    }

    /// Write a file under the work root (parent directories created)
    pub fn work_file(&self, path: impl AsRef<Path>, content: &str) -> PathBuf {
        let full_path = self.work().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Create a directory under the work root
    pub fn work_dir(&self, path: impl AsRef<Path>) -> PathBuf {
        let full_path = self.work().join(path.as_ref());
        std::fs::create_dir_all(&full_path).unwrap();
        full_path
    }

    /// Write a current-format tracking file for build directory `n`
    pub fn tracking_file(&self, hash: &str, n: u64, last_run_on: &str) -> PathBuf {
        self.work_dir(format!("{n}/s"));
        self.work_file(
            format!("SourceRootMapping/{hash}/SourceFolder.json"),
            &current_tracking_json(n, hash, last_run_on),
        )
    }

    /// Run `pa` rooted at this agent
    pub fn pa(&self) -> CliBuilder {
        cli().env("PA_ROOT", self.root())
    }
}

pub fn current_tracking_json(n: u64, hash: &str, last_run_on: &str) -> String {
    serde_json::json!({
        "fileFormatVersion": 3,
        "agent_builddirectory": n.to_string(),
        "build_artifactstagingdirectory": format!("{n}/a"),
        "build_sourcesdirectory": format!("{n}/s"),
        "common_testresultsdirectory": format!("{n}/TestResults"),
        "hashKey": hash,
        "system": "build",
        "lastRunOn": last_run_on,
        "resources": {
            "repositories": {
                "self": {
                    "repositoryType": "git",
                    "repositoryUrl": "https://example.com/self.git",
                    "sourceDirectory": format!("{n}/s"),
                }
            },
            "drops": {}
        }
    })
    .to_string()
}
