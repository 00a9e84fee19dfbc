//! Test environment for isolated envtypes runs.
//!
//! Provides `TestEnv` - a temp project directory plus helpers to run the
//! envtypes binary inside it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Variables the binary reads; cleared so the host environment never leaks in
const ENVTYPES_VARS: &[&str] = &[
    "ENVTYPES_ENV_PATHS",
    "ENVTYPES_OUTPUT",
    "ENVTYPES_VERBOSE",
    "ENVTYPES_PARTIAL",
    "ENVTYPES_LITERAL_VALUES",
    "ENVTYPES_NAMESPACE",
    "ENVTYPES_INTERFACE",
    "ENVTYPES_EXPORT_MARKER",
];

/// Result of running an envtypes CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project directory
pub struct TestEnv {
    pub project_root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Base command with a scrubbed ENVTYPES_* environment, run from the project root
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.current_dir(self.project_root.path());
        for var in ENVTYPES_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Run envtypes in this environment from project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run envtypes with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = self.command();
        cmd.args(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute envtypes");
        output_to_result(output)
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Read a project file's content
    pub fn read_project_file(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.project_path(relative_path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    pub fn exists(&self, relative_path: &str) -> bool {
        self.project_path(relative_path).exists()
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }
}

/// Path to the built envtypes binary
pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_envtypes")
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
