//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no build logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::Parser;

use crate::config::settings::Settings;
use crate::infra::dirs::LinuxBuildDirs;
use crate::infra::process::SystemRunner;
use crate::infra::prompt::{AssumeYes, Confirm, StdinConfirm};
use crate::registry::ReleaseClient;
use commands::Commands;

/// linux-build - build and install the Linux kernel
///
/// Each phase is its own subcommand: list, download, config, make, install
/// and uninstall.
#[derive(Parser, Debug)]
#[command(name = "linux-build")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Hide progress bars and command echo
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Release index URL
    #[arg(long, env = "LINUX_BUILD_RELEASES_URL", global = true)]
    pub releases_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let Some(command) = self.command else {
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            return Ok(());
        };

        let settings = Settings::load(&LinuxBuildDirs::new())?;
        let confirm: Box<dyn Confirm> = if self.yes {
            Box::new(AssumeYes)
        } else {
            Box::new(StdinConfirm)
        };
        let context = Context {
            runner: SystemRunner::with_echo(!self.quiet),
            releases_url: self
                .releases_url
                .unwrap_or_else(|| settings.releases_url().to_string()),
            settings,
            confirm,
            quiet: self.quiet,
        };

        command.run(&context).await
    }
}

/// Everything a command needs from the environment
pub struct Context {
    /// Loaded `config.toml`
    pub settings: Settings,
    /// Runs external tools
    pub runner: SystemRunner,
    /// Asks before irreversible steps
    pub confirm: Box<dyn Confirm>,
    /// Hide progress output
    pub quiet: bool,
    /// Effective release index URL
    pub releases_url: String,
}

impl Context {
    /// Client for the configured release index
    pub fn release_client(&self) -> ReleaseClient {
        ReleaseClient::with_url(self.releases_url.clone())
    }
}
