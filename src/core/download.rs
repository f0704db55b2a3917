//! Kernel source download
//!
//! Resolves a release against the index, fetches its compressed tarball
//! (resuming a partial file), decompresses it, optionally verifies the
//! detached signature and extracts the source tree.

use std::path::{Path, PathBuf};

use reqwest::Url;

use super::release::{file_name, Release, ReleaseIndex};
use crate::config::defaults::TARBALL_COMPRESSION;
use crate::error::{LinuxBuildError, Result};
use crate::infra::download::{file_checksum, DownloadManager, DownloadOutcome, ProgressCallback};
use crate::infra::process::{CommandRunner, ExternalCommand};
use crate::infra::prompt::{self, Confirm};
use crate::registry::ReleaseClient;

/// How to pick a release from the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseSelector {
    /// Exact version string
    Version(String),
    /// Newest release of a moniker
    Latest(String),
}

impl ReleaseSelector {
    /// Find the selected release
    pub fn select<'i>(&self, index: &'i ReleaseIndex) -> Result<&'i Release> {
        match self {
            Self::Version(version) => index.find_version(version),
            Self::Latest(moniker) => index.latest(moniker),
        }
    }
}

/// Options for the download phase
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Release to download
    pub selector: ReleaseSelector,
    /// Directory receiving the tarballs and the extracted tree
    pub work_dir: PathBuf,
    /// Skip the signature check
    pub skip_verify: bool,
    /// Expected SHA256 of the compressed tarball
    pub sha256: Option<String>,
}

/// Runs the download phase
pub struct Downloader<'a> {
    client: &'a ReleaseClient,
    manager: &'a DownloadManager,
    runner: &'a dyn CommandRunner,
    confirm: &'a dyn Confirm,
    progress: Option<ProgressCallback>,
}

impl<'a> Downloader<'a> {
    pub fn new(
        client: &'a ReleaseClient,
        manager: &'a DownloadManager,
        runner: &'a dyn CommandRunner,
        confirm: &'a dyn Confirm,
    ) -> Self {
        Self {
            client,
            manager,
            runner,
            confirm,
            progress: None,
        }
    }

    /// Report tarball transfer progress as `(downloaded, total)`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Download, verify and extract a release, returning the source tree
    pub async fn run(&self, request: &DownloadRequest) -> Result<PathBuf> {
        println!("Getting release information...");
        let index = self.client.fetch_index().await?;
        let release = request.selector.select(&index)?;
        println!("Found version {}.", release.version);

        let source_url = release.source_url()?;
        let pgp_url = if request.skip_verify {
            None
        } else {
            Some(release.pgp_url()?)
        };
        let tarball_name = file_name(&source_url).ok_or_else(|| LinuxBuildError::MissingSource {
            version: release.version.clone(),
        })?;

        prompt::require(self.confirm, "Download and extract?")?;

        tokio::fs::create_dir_all(&request.work_dir)
            .await
            .map_err(|e| LinuxBuildError::io(&request.work_dir, &e))?;

        println!();
        println!("Downloading release...");
        let compressed = request.work_dir.join(tarball_name);
        let outcome = fetch_tarball(
            self.manager,
            &source_url,
            &compressed,
            self.progress.as_ref(),
            request.sha256.as_deref(),
        )
        .await?;
        if let DownloadOutcome::AlreadyComplete { .. } = outcome {
            println!("Tarball already downloaded.");
        }
        println!("Downloaded release to {}.", compressed.display());

        println!();
        println!("Decompressing release...");
        let tarball = decompress(self.runner, &compressed)?;
        println!("Decompressed tarball to {}.", tarball.display());

        if let Some(pgp_url) = pgp_url {
            println!();
            println!("Verifying release...");
            verify_signature(self.manager, self.runner, &pgp_url, &tarball).await?;
            println!("Release verified successfully.");
        }

        println!();
        println!("Untarring release...");
        let source = extract(self.runner, &tarball)?;
        println!("Extracted source to {}.", source.display());

        Ok(source)
    }
}

/// Fetch the compressed tarball, resuming or skipping as the local copy allows
pub async fn fetch_tarball(
    manager: &DownloadManager,
    url: &Url,
    dest: &Path,
    progress: Option<&ProgressCallback>,
    sha256: Option<&str>,
) -> Result<DownloadOutcome> {
    let outcome = manager
        .download_resumable(url.as_str(), dest, progress)
        .await?;
    tracing::debug!("{url}: {outcome:?}");

    if let Some(expected) = sha256 {
        let actual = file_checksum(dest)?;
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(LinuxBuildError::ChecksumMismatch {
                file: dest.display().to_string(),
                expected: expected.to_lowercase(),
                actual,
            });
        }
        tracing::info!("Checksum of {} matches", dest.display());
    }

    Ok(outcome)
}

/// Decompress `<name>.tar.xz` next to itself, returning `<name>.tar`
pub fn decompress(runner: &dyn CommandRunner, compressed: &Path) -> Result<PathBuf> {
    if compressed.extension().and_then(|ext| ext.to_str()) != Some(TARBALL_COMPRESSION) {
        return Err(LinuxBuildError::UnsupportedFormat {
            path: compressed.to_path_buf(),
            expected: TARBALL_COMPRESSION.to_string(),
        });
    }

    let tarball = compressed.with_extension("");
    runner.run(
        &ExternalCommand::new("xz")
            .arg("-cd")
            .stdin_file(compressed)
            .stdout_file(&tarball),
    )?;
    Ok(tarball)
}

/// Fetch the detached signature next to `tarball` and check it with gpg
pub async fn verify_signature(
    manager: &DownloadManager,
    runner: &dyn CommandRunner,
    pgp_url: &Url,
    tarball: &Path,
) -> Result<()> {
    let signature_name = file_name(pgp_url).ok_or_else(|| LinuxBuildError::Network {
        url: pgp_url.to_string(),
        error: "URL has no file name".to_string(),
    })?;
    let dir = parent_dir(tarball);
    let signature = dir.join(&signature_name);
    manager.download(pgp_url.as_str(), &signature).await?;

    let data_name = tarball
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    runner.run(
        &ExternalCommand::new("gpg")
            .args(["--verify", signature_name.as_str(), data_name.as_str()])
            .current_dir(&dir),
    )
}

/// Unpack `tarball` beside itself and check the tree it produced
pub fn extract(runner: &dyn CommandRunner, tarball: &Path) -> Result<PathBuf> {
    let dir = parent_dir(tarball);
    let expected = tarball.with_extension("");
    let archive = tarball
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    runner.run(
        &ExternalCommand::new("tar")
            .args(["-xf", archive.as_str()])
            .current_dir(&dir),
    )?;

    if !expected.is_dir() {
        return Err(LinuxBuildError::ExtractedDirMissing {
            tarball: tarball.to_path_buf(),
            expected,
        });
    }
    Ok(expected)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
