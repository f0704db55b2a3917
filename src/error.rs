//! Error types for linux-build
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level linux-build error type
#[derive(Error, Debug)]
pub enum LinuxBuildError {
    /// Requested release is not in the index
    #[error("Version {version} not found")]
    VersionNotFound { version: String },

    /// No release with the given moniker is in the index
    #[error("No releases with moniker '{moniker}' found")]
    MonikerNotFound { moniker: String },

    /// User declined a confirmation prompt
    #[error("User aborted")]
    UserAborted,

    /// File does not carry the expected compression suffix
    #[error("Unsupported archive '{path}': expected a '.{expected}' file")]
    UnsupportedFormat { path: PathBuf, expected: String },

    /// Value outside a fixed set of choices
    #[error("Invalid {kind} '{value}': must be one of {}", .choices.join(", "))]
    InvalidChoice {
        kind: &'static str,
        value: String,
        choices: Vec<String>,
    },

    /// Release URL does not use https
    #[error("Refusing insecure URL '{url}': only https is allowed")]
    InsecureUrl { url: String },

    /// Release has no source tarball
    #[error("Release {version} has no source tarball")]
    MissingSource { version: String },

    /// Install name cannot be used in a boot path
    #[error("Invalid install name '{name}': must be non-empty and contain no '/'")]
    InvalidName { name: String },

    /// Release has no signature to verify against
    #[error("Release {version} has no PGP signature. Use --skip-verify to continue")]
    MissingSignature { version: String },

    /// Downloaded tarball digest did not match
    #[error("Checksum mismatch for '{file}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    /// Extraction did not produce the expected directory
    #[error("Extracting '{tarball}' did not produce directory '{expected}'")]
    ExtractedDirMissing { tarball: PathBuf, expected: PathBuf },

    /// External tool is not on PATH
    #[error("Required tool '{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    /// External command exited unsuccessfully
    #[error("Command '{command}' failed with {}", describe_status(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// Network error
    #[error("Network error for '{url}': {error}")]
    Network { url: String, error: String },

    /// Configuration file error
    #[error("Config error for '{path}': {error}")]
    Config { path: PathBuf, error: String },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}

#[allow(clippy::ref_option)]
fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "termination by signal".to_string(),
    }
}

impl LinuxBuildError {
    /// Build an IO error for a path
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error: error.to_string(),
        }
    }

    /// Process exit code to report for this error
    ///
    /// Mirrors the failing command's status when it exited normally.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Result alias used throughout the library
pub type Result<T, E = LinuxBuildError> = std::result::Result<T, E>;
