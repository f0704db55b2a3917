//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test workspace
///
/// A temporary working directory with its own, initially empty, config
/// directory so the user's `config.toml` never leaks into a test.
pub struct TestProject {
    /// Temporary directory for the test workspace
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new workspace in a temporary directory
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::create_dir(dir.path().join("config")).expect("Failed to create config dir");
        Self { dir }
    }

    /// Get the path to the workspace directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Config directory handed to the binary
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Write `config.toml`
    pub fn write_settings(&self, content: &str) {
        std::fs::write(self.config_dir().join("config.toml"), content)
            .expect("Failed to write config.toml");
    }

    /// Create a directory in the workspace
    pub fn create_dir(&self, name: &str) {
        std::fs::create_dir_all(self.dir.path().join(name)).expect("Failed to create directory");
    }

    /// Names of the entries in the workspace, excluding the config directory
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .expect("Failed to read workspace")
            .map(|entry| entry.expect("Failed to read entry").file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| name != "config")
            .collect();
        names.sort();
        names
    }

    /// Run linux-build in the workspace
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute linux-build")
    }

    /// Run linux-build against a release index
    pub fn run_with_index(&self, index_url: &str, args: &[&str]) -> Output {
        self.command(args)
            .env("LINUX_BUILD_RELEASES_URL", index_url)
            .output()
            .expect("Failed to execute linux-build")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_linux-build"));
        cmd.current_dir(self.dir.path())
            .env("LINUX_BUILD_CONFIG_DIR", self.config_dir())
            .env_remove("LINUX_BUILD_RELEASES_URL")
            .env_remove("RUST_LOG")
            .args(args);
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Stdout of a finished command
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished command
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// One release entry as kernel.org publishes it
pub fn release(version: &str, moniker: &str, timestamp: i64) -> Value {
    json!({
        "iseol": false,
        "version": version,
        "moniker": moniker,
        "source": format!("https://cdn.kernel.org/pub/linux/kernel/v6.x/linux-{version}.tar.xz"),
        "pgp": format!("https://cdn.kernel.org/pub/linux/kernel/v6.x/linux-{version}.tar.sign"),
        "released": { "timestamp": timestamp, "isodate": "2023-12-13" },
        "gitweb": "https://git.kernel.org/stable/h/v6.6.7",
        "changelog": null,
        "diffview": null,
        "patch": { "full": null, "incremental": null }
    })
}

/// Index with five stable releases, newest first
pub fn stable_index() -> Value {
    json!({
        "latest_stable": { "version": "6.6.7" },
        "releases": [
            release("6.6.7", "stable", 1_702_540_800),
            release("6.6.6", "stable", 1_702_281_600),
            release("6.6.5", "stable", 1_702_022_400),
            release("6.6.4", "stable", 1_701_763_200),
            release("6.6.3", "stable", 1_701_504_000),
        ]
    })
}

/// Index mixing mainline, stable and longterm releases
pub fn mixed_index() -> Value {
    json!({
        "releases": [
            release("6.7-rc5", "mainline", 1_702_195_200),
            release("6.6.7", "stable", 1_702_540_800),
            release("6.1.68", "longterm", 1_702_454_400),
            release("6.6.6", "stable", 1_702_281_600),
            release("5.15.143", "longterm", 1_702_627_200),
        ]
    })
}

/// Serve `index` at `/releases.json`, returning the server and index URL
pub async fn serve_index(index: Value) -> (MockServer, String) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(index))
        .mount(&server)
        .await;
    let url = format!("{}/releases.json", server.uri());
    (server, url)
}
