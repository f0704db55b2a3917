//! CLI implementation for `linux-build install`

use std::path::Path;

use anyhow::Result;

use crate::cli::output::status;
use crate::cli::Context;
use crate::core::install::Installer;
use crate::core::scheme::{BootloaderRegistry, InitrdRegistry};

/// Execute the install command
pub fn execute(
    context: &Context,
    source: &Path,
    name: &str,
    initrd: &str,
    bootloader: &str,
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

    let installed = installer.install(source, name, initrd, bootloader)?;

    println!();
    println!(
        "{} Installed {} as {}",
        status::SUCCESS,
        installed.release,
        installed.name
    );
    println!("    image:  {}", installed.image.display());
    println!("    initrd: {}", installed.initrd.display());
    Ok(())
}
