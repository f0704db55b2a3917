//! linux-build CLI
//!
//! Entry point for the linux-build command-line application.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use linux_build::cli::output::display_error;
use linux_build::cli::Cli;
use linux_build::error::LinuxBuildError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        dirty = option_env!("VERGEN_GIT_DIRTY").unwrap_or("unknown"),
        built = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown"),
        rustc = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown"),
        "{} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );

    // Run the command and handle errors
    if let Err(e) = cli.run().await {
        display_error(&e);
        let code = e
            .downcast_ref::<LinuxBuildError>()
            .map_or(1, LinuxBuildError::exit_code);
        std::process::exit(code);
    }
}
