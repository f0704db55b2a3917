//! Platform-specific directory management
//!
//! Follows the XDG Base Directory Specification for the config directory.
//! `LINUX_BUILD_CONFIG_DIR` overrides the default location.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "LINUX_BUILD_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "linux-build";

/// Settings file name inside the config directory
const SETTINGS_FILE: &str = "config.toml";

/// Directory provider for linux-build
#[derive(Debug, Clone)]
pub struct LinuxBuildDirs {
    config_dir: PathBuf,
}

impl LinuxBuildDirs {
    /// Resolve directories from the environment or platform defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/linux-build` or `~/.config/linux-build`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Path to `config.toml` in the config directory
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for LinuxBuildDirs {
    fn default() -> Self {
        Self::new()
    }
}
