//! Kernel installation
//!
//! Copies a built kernel into the boot directory, installs its modules,
//! generates its ramdisk and refreshes the bootloader configuration.

use std::path::{Path, PathBuf};

use super::boot::{validate_install_name, BootLayout, KernelTree};
use super::scheme::{BootloaderRegistry, InitrdRegistry};
use crate::error::Result;
use crate::infra::process::{CommandRunner, ExternalCommand};
use crate::infra::prompt::{self, Confirm};

/// A kernel that was installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledKernel {
    /// Release string reported by the build tree
    pub release: String,
    /// User-chosen install name
    pub name: String,
    /// Installed kernel image
    pub image: PathBuf,
    /// Generated ramdisk
    pub initrd: PathBuf,
}

/// Installs and uninstalls kernels
pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    confirm: &'a dyn Confirm,
    layout: &'a BootLayout,
    initrds: &'a InitrdRegistry,
    bootloaders: &'a BootloaderRegistry,
}

impl<'a> Installer<'a> {
    /// Create an installer over the given collaborators
    pub fn new(
        runner: &'a dyn CommandRunner,
        confirm: &'a dyn Confirm,
        layout: &'a BootLayout,
        initrds: &'a InitrdRegistry,
        bootloaders: &'a BootloaderRegistry,
    ) -> Self {
        Self {
            runner,
            confirm,
            layout,
            initrds,
            bootloaders,
        }
    }

    pub(crate) fn runner(&self) -> &dyn CommandRunner {
        self.runner
    }

    pub(crate) fn confirm(&self) -> &dyn Confirm {
        self.confirm
    }

    pub(crate) fn layout(&self) -> &BootLayout {
        self.layout
    }

    pub(crate) fn initrds(&self) -> &InitrdRegistry {
        self.initrds
    }

    pub(crate) fn bootloaders(&self) -> &BootloaderRegistry {
        self.bootloaders
    }

    /// Install the kernel built in `source` under `name`
    pub fn install(
        &self,
        source: &Path,
        name: &str,
        initrd: &str,
        bootloader: &str,
    ) -> Result<InstalledKernel> {
        validate_install_name(name)?;
        let initrd = self.initrds.get(initrd)?;
        let bootloader = self.bootloaders.get(bootloader)?;

        let tree = KernelTree::new(source);
        let release = tree.kernel_release(self.runner)?;
        let image_name = tree.image_name(self.runner)?;

        prompt::require(self.confirm, &format!("Install {release} as {name}?"))?;

        let image = self.layout.kernel_image(name);
        self.runner.run(
            &ExternalCommand::new("cp")
                .arg(image_name.as_str())
                .path_arg(&image)
                .current_dir(source),
        )?;

        self.runner.run(&tree.make(["modules_install"]))?;

        for command in initrd.generate(self.layout, &release, name) {
            self.runner.run(&command)?;
        }

        for command in bootloader.regenerate(self.layout) {
            self.runner.run(&command)?;
        }

        Ok(InstalledKernel {
            initrd: initrd.image_path(self.layout, name),
            release,
            name: name.to_string(),
            image,
        })
    }
}
