//! CLI implementation for `linux-build make`

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::output::{status, suggest_next};
use crate::cli::Context;
use crate::core::make::make_kernel;

/// Execute the make command
///
/// Flags override `[build]` in `config.toml`.
pub fn execute(
    context: &Context,
    source: &Path,
    jobs: Option<usize>,
    log: Option<PathBuf>,
) -> Result<()> {
    let jobs = jobs.unwrap_or_else(|| context.settings.build_jobs());
    let log = log.unwrap_or_else(|| context.settings.build_log());

    make_kernel(&context.runner, source, &log, jobs)?;

    println!("{} Build finished, log in {}", status::SUCCESS, source.join(&log).display());
    suggest_next(
        &format!("install {} NAME --initrd mkinitcpio --bootloader grub", source.display()),
        "install the kernel",
    );
    Ok(())
}
