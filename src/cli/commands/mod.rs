//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod download;
pub mod install;
pub mod list;
pub mod make;
pub mod uninstall;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use super::Context;
use crate::core::configure::ConfigTarget;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available kernel releases
    List {
        /// Number of releases to show per moniker (0 for all)
        #[arg(short = 'n', long, default_value_t = 0)]
        limit: usize,

        /// Release category (e.g. mainline, stable, longterm)
        #[arg(value_name = "MONIKER")]
        moniker: Option<String>,
    },

    /// Download the kernel source
    Download {
        /// Don't verify the source tarball
        #[arg(long)]
        skip_verify: bool,

        /// Download the newest release of this moniker instead of VERSION
        #[arg(long, value_name = "MONIKER", conflicts_with = "release")]
        latest: Option<String>,

        /// Expected SHA256 of the compressed tarball
        #[arg(long, value_name = "HEX")]
        sha256: Option<String>,

        /// Directory to download and extract into
        #[arg(long, value_name = "PATH", default_value = ".")]
        dir: PathBuf,

        /// Kernel release version
        #[arg(id = "release", value_name = "VERSION", required_unless_present = "latest")]
        version: Option<String>,
    },

    /// Configure the kernel
    Config {
        /// Old .config file to copy into the tree first
        #[arg(short = 'O', long, value_name = "CONFIG")]
        old_config: Option<PathBuf>,

        /// Kernel source directory
        #[arg(value_name = "SOURCEDIR")]
        source: PathBuf,

        /// Configuration target (e.g. menuconfig, oldconfig, olddefconfig)
        #[arg(value_name = "TARGET")]
        target: ConfigTarget,
    },

    /// Build the kernel
    Make {
        /// Number of make jobs to run simultaneously (defaults to CPU cores - 1)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Log file for make stdout and stderr
        #[arg(short, long, value_name = "PATH")]
        log: Option<PathBuf>,

        /// Kernel source directory
        #[arg(value_name = "SOURCEDIR")]
        source: PathBuf,
    },

    /// Install the kernel
    Install {
        /// Kernel source directory
        #[arg(value_name = "SOURCEDIR")]
        source: PathBuf,

        /// Installed kernel name
        #[arg(value_name = "NAME")]
        name: String,

        /// Initial ramdisk scheme
        #[arg(long, value_name = "SCHEME")]
        initrd: String,

        /// Bootloader to reconfigure
        #[arg(long, value_name = "SCHEME")]
        bootloader: String,
    },

    /// Uninstall the kernel and delete its sources
    Uninstall {
        /// Kernel source directory
        #[arg(value_name = "SOURCEDIR")]
        source: PathBuf,

        /// Installed kernel name; omit to remove only the modules
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Initial ramdisk scheme to remove
        #[arg(long, value_name = "SCHEME")]
        initrd: Option<String>,

        /// Bootloader to reconfigure
        #[arg(long, value_name = "SCHEME")]
        bootloader: Option<String>,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, context: &Context) -> Result<()> {
        match self {
            Self::List { limit, moniker } => list::execute(context, moniker, limit).await,
            Self::Download {
                skip_verify,
                latest,
                sha256,
                dir,
                version,
            } => {
                let options = download::DownloadArgs {
                    version,
                    latest,
                    skip_verify,
                    sha256,
                    dir,
                };
                download::execute(context, options).await
            }
            Self::Config {
                old_config,
                source,
                target,
            } => config::execute(context, &source, target, old_config.as_deref()),
            Self::Make { jobs, log, source } => make::execute(context, &source, jobs, log),
            Self::Install {
                source,
                name,
                initrd,
                bootloader,
            } => install::execute(context, &source, &name, &initrd, &bootloader),
            Self::Uninstall {
                source,
                name,
                initrd,
                bootloader,
            } => uninstall::execute(
                context,
                &source,
                name.as_deref(),
                initrd.as_deref(),
                bootloader.as_deref(),
            ),
        }
    }
}
