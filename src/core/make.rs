//! Kernel build
//!
//! Runs `make -j N` in the source tree with its merged output piped through
//! `tee`, so the build streams to the console and lands in a log file.

use std::path::Path;

use super::boot::KernelTree;
use crate::error::Result;
use crate::infra::process::{CommandRunner, ExternalCommand};

/// Build the kernel in `source`
///
/// A relative `log` path is resolved against the source directory.
pub fn make_kernel(runner: &dyn CommandRunner, source: &Path, log: &Path, jobs: usize) -> Result<()> {
    let jobs = jobs.max(1);
    tracing::info!("Building {} with {jobs} jobs", source.display());

    let tree = KernelTree::new(source);
    let make = tree.make(["-j".to_string(), jobs.to_string()]);
    let tee = ExternalCommand::new("tee").path_arg(log).current_dir(source);

    runner.pipe(&make, &tee)
}
