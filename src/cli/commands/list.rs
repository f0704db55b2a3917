//! CLI implementation for `linux-build list`

use anyhow::{Context as _, Result};

use crate::cli::output::create_spinner;
use crate::cli::Context;
use crate::core::list::{render_listing, ListOptions};

/// Execute the list command
pub async fn execute(context: &Context, moniker: Option<String>, limit: usize) -> Result<()> {
    let client = context.release_client();

    let spinner = (!context.quiet).then(|| create_spinner("Fetching release index..."));
    let index = client.fetch_index().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let index = index.with_context(|| format!("Failed to list releases from {}", client.index_url()))?;

    let options = ListOptions { moniker, limit };
    for line in render_listing(&index, &options) {
        println!("{line}");
    }

    Ok(())
}
