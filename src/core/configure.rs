//! Kernel configuration
//!
//! Runs one of the kernel's Kconfig make targets, optionally seeding the
//! tree with an existing `.config` first.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::boot::KernelTree;
use crate::error::{LinuxBuildError, Result};
use crate::infra::process::CommandRunner;

/// Kconfig make targets (from `make help`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigTarget {
    Config,
    Nconfig,
    Menuconfig,
    Xconfig,
    Gconfig,
    Oldconfig,
    Localmodconfig,
    Localyesconfig,
    Silentoldconfig,
    Defconfig,
    Savedefconfig,
    Allnoconfig,
    Allyesconfig,
    Allmodconfig,
    Alldefconfig,
    Randconfig,
    Listnewconfig,
    Olddefconfig,
}

impl ConfigTarget {
    /// Every target, in `make help` order
    pub const ALL: [Self; 18] = [
        Self::Config,
        Self::Nconfig,
        Self::Menuconfig,
        Self::Xconfig,
        Self::Gconfig,
        Self::Oldconfig,
        Self::Localmodconfig,
        Self::Localyesconfig,
        Self::Silentoldconfig,
        Self::Defconfig,
        Self::Savedefconfig,
        Self::Allnoconfig,
        Self::Allyesconfig,
        Self::Allmodconfig,
        Self::Alldefconfig,
        Self::Randconfig,
        Self::Listnewconfig,
        Self::Olddefconfig,
    ];

    /// Make target name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Nconfig => "nconfig",
            Self::Menuconfig => "menuconfig",
            Self::Xconfig => "xconfig",
            Self::Gconfig => "gconfig",
            Self::Oldconfig => "oldconfig",
            Self::Localmodconfig => "localmodconfig",
            Self::Localyesconfig => "localyesconfig",
            Self::Silentoldconfig => "silentoldconfig",
            Self::Defconfig => "defconfig",
            Self::Savedefconfig => "savedefconfig",
            Self::Allnoconfig => "allnoconfig",
            Self::Allyesconfig => "allyesconfig",
            Self::Allmodconfig => "allmodconfig",
            Self::Alldefconfig => "alldefconfig",
            Self::Randconfig => "randconfig",
            Self::Listnewconfig => "listnewconfig",
            Self::Olddefconfig => "olddefconfig",
        }
    }
}

impl fmt::Display for ConfigTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigTarget {
    type Err = LinuxBuildError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| LinuxBuildError::InvalidChoice {
                kind: "configuration target",
                value: s.to_string(),
                choices: Self::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            })
    }
}

/// Configure the kernel in `source`
///
/// `old_config` is copied to `<source>/.config` before `make <target>` runs.
pub fn configure_kernel(
    runner: &dyn CommandRunner,
    source: &Path,
    target: ConfigTarget,
    old_config: Option<&Path>,
) -> Result<()> {
    if let Some(old_config) = old_config {
        let dest = source.join(".config");
        std::fs::copy(old_config, &dest).map_err(|e| LinuxBuildError::io(old_config, &e))?;
        tracing::info!("Copied {} to {}", old_config.display(), dest.display());
    }

    let tree = KernelTree::new(source);
    runner.run(&tree.make([target.as_str()]))
}
