//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress bars,
//! status messages and errors to the user.

use indicatif::{ProgressBar, ProgressStyle};

use crate::infra::download::ProgressCallback;

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Create a progress bar for downloads
pub fn create_download_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░"),
    );
    pb
}

/// Progress callback driving a download bar
///
/// The bar's length is taken from the first report, since the size is only
/// known once the transfer starts. The bar is cleared as soon as the last
/// byte arrives so later output is not drawn under it.
pub fn download_progress(bar: &ProgressBar) -> ProgressCallback {
    let bar = bar.clone();
    Box::new(move |downloaded, total| {
        if bar.is_finished() {
            return;
        }
        if total > 0 && bar.length() != Some(total) {
            bar.set_length(total);
        }
        bar.set_position(downloaded);
        if total > 0 && downloaded >= total {
            bar.finish_and_clear();
        }
    })
}

/// Print an error with its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Print the command to run for the next phase
pub fn suggest_next(command: &str, purpose: &str) {
    println!();
    println!("Run `{} {command}` to {purpose}.", program_name());
}

/// Name the program was invoked as
pub fn program_name() -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}
