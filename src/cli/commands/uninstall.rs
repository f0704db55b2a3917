//! CLI implementation for `linux-build uninstall`

use std::path::Path;

use anyhow::Result;

use crate::cli::output::status;
use crate::cli::Context;
use crate::core::install::Installer;
use crate::core::scheme::{BootloaderRegistry, InitrdRegistry};
use crate::core::uninstall::UninstallOptions;

/// Execute the uninstall command
pub fn execute(
    context: &Context,
    source: &Path,
    name: Option<&str>,
    initrd: Option<&str>,
    bootloader: Option<&str>,
) -> Result<()> {
    let layout = context.settings.boot_layout();
    let initrds = InitrdRegistry::builtin();
    let bootloaders = BootloaderRegistry::builtin();
    let installer = Installer::new(
        &context.runner,
        &*context.confirm,
        &layout,
        &initrds,
        &bootloaders,
    );

    let options = UninstallOptions {
        name,
        initrd,
        bootloader,
    };
    installer.uninstall(source, &options)?;

    println!("{} Uninstalled {}", status::SUCCESS, source.display());
    Ok(())
}
