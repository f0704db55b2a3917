//! Boot locations and kernel tree queries

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::error::{LinuxBuildError, Result};
use crate::infra::process::{CommandRunner, ExternalCommand};

/// Where an installed kernel's files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootLayout {
    /// Kernel images and ramdisks
    pub boot_dir: PathBuf,
    /// Installed module trees, one per kernel release
    pub modules_dir: PathBuf,
    /// mkinitcpio configuration file
    pub mkinitcpio_conf: PathBuf,
    /// Generated GRUB configuration
    pub grub_cfg: PathBuf,
}

impl BootLayout {
    /// Default layout under another boot directory
    pub fn with_boot_dir(boot_dir: PathBuf) -> Self {
        Self {
            grub_cfg: boot_dir.join(defaults::GRUB_CFG_RELATIVE),
            boot_dir,
            ..Self::default()
        }
    }

    /// Kernel image path for an install name
    pub fn kernel_image(&self, name: &str) -> PathBuf {
        self.boot_dir.join(format!("vmlinuz-{name}"))
    }

    /// Module directory for a kernel release
    pub fn modules_path(&self, release: &str) -> PathBuf {
        self.modules_dir.join(release)
    }
}

impl Default for BootLayout {
    fn default() -> Self {
        let boot_dir = PathBuf::from(defaults::DEFAULT_BOOT_DIR);
        Self {
            grub_cfg: boot_dir.join(defaults::GRUB_CFG_RELATIVE),
            boot_dir,
            modules_dir: PathBuf::from(defaults::DEFAULT_MODULES_DIR),
            mkinitcpio_conf: PathBuf::from(defaults::DEFAULT_MKINITCPIO_CONF),
        }
    }
}

/// Reject install names that cannot form a boot file name
pub fn validate_install_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') {
        return Err(LinuxBuildError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A configured kernel source tree
#[derive(Debug, Clone)]
pub struct KernelTree {
    source: PathBuf,
}

impl KernelTree {
    /// Wrap a source directory
    pub fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
        }
    }

    /// Source directory
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// `make` invocation inside the tree
    pub fn make<I, S>(&self, args: I) -> ExternalCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExternalCommand::new("make")
            .args(args)
            .current_dir(&self.source)
    }

    /// Release string the build system computes, e.g. `6.6.7-custom`
    pub fn kernel_release(&self, runner: &dyn CommandRunner) -> Result<String> {
        runner.output(&self.make(["-s", "kernelrelease"]))
    }

    /// Built image path relative to the tree, e.g. `arch/x86/boot/bzImage`
    pub fn image_name(&self, runner: &dyn CommandRunner) -> Result<String> {
        runner.output(&self.make(["-s", "image_name"]))
    }
}
