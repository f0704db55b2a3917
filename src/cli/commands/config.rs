//! CLI implementation for `linux-build config`

use std::path::Path;

use anyhow::Result;

use crate::cli::output::suggest_next;
use crate::cli::Context;
use crate::core::configure::{configure_kernel, ConfigTarget};

/// Execute the config command
pub fn execute(
    context: &Context,
    source: &Path,
    target: ConfigTarget,
    old_config: Option<&Path>,
) -> Result<()> {
    configure_kernel(&context.runner, source, target, old_config)?;

    suggest_next(
        &format!("make [options] {}", source.display()),
        "build the kernel",
    );
    Ok(())
}
