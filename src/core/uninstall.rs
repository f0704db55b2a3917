//! Kernel removal
//!
//! Undoes an install and deletes the source tree together with the
//! tarballs it was extracted from.

use std::path::{Path, PathBuf};

use super::boot::KernelTree;
use super::install::Installer;
use crate::config::defaults::{SIGNATURE_SUFFIX, TARBALL_COMPRESSION};
use crate::error::{LinuxBuildError, Result};
use crate::infra::process::ExternalCommand;
use crate::infra::prompt;

/// What to remove besides the module tree
#[derive(Debug, Clone, Default)]
pub struct UninstallOptions<'o> {
    /// Install name; `None` keeps the image and ramdisk
    pub name: Option<&'o str>,
    /// Initrd scheme whose ramdisk is removed
    pub initrd: Option<&'o str>,
    /// Bootloader to regenerate afterwards
    pub bootloader: Option<&'o str>,
}

impl Installer<'_> {
    /// Uninstall the kernel built in `source` and delete its sources
    pub fn uninstall(&self, source: &Path, options: &UninstallOptions<'_>) -> Result<()> {
        let initrd = self.initrds().get_optional(options.initrd)?;
        let bootloader = self.bootloaders().get_optional(options.bootloader)?;
        let (parent, base) = split_source(source)?;

        let tree = KernelTree::new(source);
        let release = tree.kernel_release(self.runner())?;

        let question = match options.name {
            Some(name) => format!("Uninstall {release} named {name}?"),
            None => format!("Uninstall {release}?"),
        };
        prompt::require(self.confirm(), &question)?;

        let layout = self.layout();
        self.runner().run(
            &ExternalCommand::new("rm")
                .arg("-r")
                .path_arg(&layout.modules_path(&release)),
        )?;

        if let Some(name) = options.name {
            self.runner()
                .run(&ExternalCommand::new("rm").path_arg(&layout.kernel_image(name)))?;
            if let Some(initrd) = initrd {
                self.runner()
                    .run(&ExternalCommand::new("rm").path_arg(&initrd.image_path(layout, name)))?;
            }
        }

        if let Some(bootloader) = bootloader {
            for command in bootloader.regenerate(layout) {
                self.runner().run(&command)?;
            }
        }

        self.runner().run(
            &ExternalCommand::new("rm")
                .arg("-r")
                .path_arg(tree.source()),
        )?;

        let leftovers = source_artifacts(&parent, &base);
        if leftovers.is_empty() {
            tracing::debug!("No tarballs left next to {}", source.display());
        } else {
            let rm = leftovers
                .iter()
                .fold(ExternalCommand::new("rm"), |rm, path| rm.path_arg(path));
            self.runner().run(&rm)?;
        }

        Ok(())
    }
}

/// Directory holding the source tree and the tree's base name
fn split_source(source: &Path) -> Result<(PathBuf, String)> {
    let resolved;
    let source = if source.file_name().is_some() {
        source
    } else {
        resolved = source
            .canonicalize()
            .map_err(|e| LinuxBuildError::io(source, &e))?;
        resolved.as_path()
    };

    let base = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| LinuxBuildError::InvalidName {
            name: source.display().to_string(),
        })?;
    let parent = match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((parent, base))
}

/// Tarball and signature files next to the source tree that still exist
fn source_artifacts(parent: &Path, base: &str) -> Vec<PathBuf> {
    [
        format!("{base}.tar"),
        format!("{base}.tar.{TARBALL_COMPRESSION}"),
        format!("{base}.tar.{SIGNATURE_SUFFIX}"),
    ]
    .into_iter()
    .map(|file| parent.join(file))
    .filter(|path| path.exists())
    .collect()
}
