//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Accessors for the persisted configuration

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated configuration file and storage root.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory for test files
/// - A configuration file path (not created yet - linkvault will create it)
/// - A storage root path under the temporary directory
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Path to the storage root
    pub sync_root: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_path = temp_path.join("linkvault.json");
        let sync_root = temp_path.join("vault");

        Self {
            temp_dir,
            temp_path,
            config_path,
            sync_root,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Environment overrides are cleared so the host environment cannot leak
    /// into the test.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("linkvault").expect("Failed to find linkvault binary");
        cmd.env_remove("LINKVAULT_CONFIG")
            .env_remove("LINKVAULT_SYNC_PATH")
            .env_remove("LINKVAULT_LOG_MODE")
            .env_remove("LINKVAULT_OUTPUT_FORMAT");
        cmd
    }

    /// Get a command builder with the configuration file and storage root
    /// pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config")
            .arg(&self.config_path)
            .arg("--sync-path")
            .arg(&self.sync_root);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory with one file in it.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        std::fs::write(path.join("README.md"), name).expect("Failed to write test file");
        path
    }

    /// Create a file with the given contents.
    pub fn create_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Link a path, asserting success.
    pub fn link(&self, path: &Path) {
        self.command().arg("link").arg(path).assert().success();
    }

    /// List links as parsed JSON.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .command()
            .args(["list", "--format", "json"])
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("List output is not JSON")
    }

    /// Read the persisted configuration document.
    pub fn config_json(&self) -> serde_json::Value {
        let contents =
            std::fs::read_to_string(&self.config_path).expect("Failed to read configuration");
        serde_json::from_str(&contents).expect("Configuration is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
