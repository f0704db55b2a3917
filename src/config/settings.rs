//! User settings
//!
//! Reads optional settings from `config.toml` in the config directory.
//! Every key is optional; command-line flags take precedence over the file
//! and the file over built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{defaults, urls};
use crate::core::boot::BootLayout;
use crate::error::{LinuxBuildError, Result};
use crate::infra::dirs::LinuxBuildDirs;

/// Settings loaded from `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Release index settings
    #[serde(default)]
    pub releases: ReleasesConfig,

    /// System install locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Default build options
    #[serde(default)]
    pub build: BuildConfig,
}

/// Release index configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleasesConfig {
    /// Custom release index URL
    pub url: Option<String>,
}

/// Install location configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Boot directory (kernel images and ramdisks)
    pub boot_dir: Option<PathBuf>,

    /// mkinitcpio configuration file
    pub mkinitcpio_conf: Option<PathBuf>,

    /// GRUB configuration output file
    pub grub_cfg: Option<PathBuf>,
}

/// Default build options
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildConfig {
    /// Number of parallel make jobs
    pub jobs: Option<usize>,

    /// Build log file
    pub log: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the config directory
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(dirs: &LinuxBuildDirs) -> Result<Self> {
        Self::load_from_path(&dirs.settings_path())
    }

    /// Load settings from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| LinuxBuildError::io(path, &e))?;

        let settings: Self = toml::from_str(&content).map_err(|e| LinuxBuildError::Config {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Effective release index URL
    pub fn releases_url(&self) -> &str {
        self.releases.url.as_deref().unwrap_or(urls::RELEASE_INDEX)
    }

    /// Effective number of build jobs
    pub fn build_jobs(&self) -> usize {
        self.build
            .jobs
            .filter(|jobs| *jobs > 0)
            .unwrap_or_else(defaults::default_build_jobs)
    }

    /// Effective build log path
    pub fn build_log(&self) -> PathBuf {
        self.build
            .log
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::DEFAULT_BUILD_LOG))
    }

    /// Install locations with defaults filled in
    ///
    /// The GRUB config follows a configured boot directory unless it is set
    /// itself.
    pub fn boot_layout(&self) -> BootLayout {
        let mut layout = match &self.paths.boot_dir {
            Some(boot_dir) => BootLayout::with_boot_dir(boot_dir.clone()),
            None => BootLayout::default(),
        };
        if let Some(grub_cfg) = &self.paths.grub_cfg {
            layout.grub_cfg.clone_from(grub_cfg);
        }
        if let Some(mkinitcpio_conf) = &self.paths.mkinitcpio_conf {
            layout.mkinitcpio_conf.clone_from(mkinitcpio_conf);
        }
        layout
    }
}
