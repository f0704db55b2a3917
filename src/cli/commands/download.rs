//! CLI implementation for `linux-build download`

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::output::{create_download_bar, download_progress, status, suggest_next};
use crate::cli::Context;
use crate::core::download::{DownloadRequest, Downloader, ReleaseSelector};
use crate::infra::download::DownloadManager;

/// Arguments of the download command
#[derive(Debug, Clone)]
pub struct DownloadArgs {
    pub version: Option<String>,
    pub latest: Option<String>,
    pub skip_verify: bool,
    pub sha256: Option<String>,
    pub dir: PathBuf,
}

/// Execute the download command
pub async fn execute(context: &Context, args: DownloadArgs) -> Result<()> {
    let selector = match (args.latest, args.version) {
        (Some(moniker), _) => ReleaseSelector::Latest(moniker),
        (None, Some(version)) => ReleaseSelector::Version(version),
        (None, None) => anyhow::bail!("Give a VERSION or --latest MONIKER"),
    };
    let request = DownloadRequest {
        selector,
        work_dir: args.dir,
        skip_verify: args.skip_verify,
        sha256: args.sha256,
    };

    let client = context.release_client();
    let manager = DownloadManager::new();
    let mut downloader = Downloader::new(&client, &manager, &context.runner, &*context.confirm);

    let bar = (!context.quiet).then(|| create_download_bar(0));
    if let Some(bar) = &bar {
        downloader = downloader.with_progress(download_progress(bar));
    }

    let result = downloader.run(&request).await;
    // Covers transfers of unknown length and runs that never reached the transfer.
    if let Some(bar) = bar.filter(|bar| !bar.is_finished()) {
        bar.finish_and_clear();
    }
    let source = result?;

    if request.skip_verify {
        println!("{} Signature check skipped", status::WARNING);
    }
    suggest_next(
        &format!("config [options] {}", source.display()),
        "configure the kernel",
    );
    Ok(())
}
