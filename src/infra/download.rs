//! HTTP download functionality
//!
//! Handles downloading files with progress reporting, resuming partial
//! downloads, and checksum computation.

use futures::StreamExt;
use reqwest::header::{CONTENT_LENGTH, RANGE};
use reqwest::StatusCode;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::{LinuxBuildError, Result};

/// Progress callback type for download progress reporting
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// What a resumable download did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Local file already had the remote size; nothing was transferred
    AlreadyComplete { size: u64 },
    /// Bytes were transferred, starting at `resumed_from`
    Transferred { resumed_from: u64, size: u64 },
}

impl DownloadOutcome {
    /// Final size of the local file
    pub fn size(&self) -> u64 {
        match self {
            Self::AlreadyComplete { size } | Self::Transferred { size, .. } => *size,
        }
    }
}

/// Download manager for fetching files over HTTP
#[derive(Debug, Clone)]
pub struct DownloadManager {
    /// HTTP client
    client: reqwest::Client,
}

impl DownloadManager {
    /// Create a new download manager
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Remote size from a HEAD request's `Content-Length`
    ///
    /// Returns `None` when the server does not report a length.
    pub async fn remote_size(&self, url: &str) -> Result<Option<u64>> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| network(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(network(url, format!("HTTP {}", response.status())));
        }

        // `Response::content_length` reflects the (empty) HEAD body, not the header.
        let size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok());
        tracing::debug!("HEAD {url}: Content-Length {size:?}");
        Ok(size)
    }

    /// Download `url` into `dest`, resuming a partial file
    ///
    /// An existing file whose size equals the remote `Content-Length` is
    /// kept without transferring anything. A file larger than the remote one
    /// is downloaded again from scratch. Otherwise the transfer continues
    /// from the end of the existing file. Partial files are left in place on
    /// failure so a later run can resume them.
    pub async fn download_resumable(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<DownloadOutcome> {
        let local_size = match tokio::fs::metadata(dest).await {
            Ok(meta) => Some(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(LinuxBuildError::io(dest, &e)),
        };

        let (offset, remote) = match local_size {
            Some(size) => {
                let remote = self.remote_size(url).await?;
                match remote {
                    Some(r) if r == size => {
                        tracing::info!("{} already downloaded ({size} bytes)", dest.display());
                        return Ok(DownloadOutcome::AlreadyComplete { size });
                    }
                    Some(r) if size > r => {
                        tracing::warn!(
                            "{} is larger than the remote file ({size} > {r} bytes); restarting",
                            dest.display()
                        );
                        (0, remote)
                    }
                    Some(_) => (size, remote),
                    None => {
                        tracing::warn!("Server did not report a size for {url}; resuming blindly");
                        (size, remote)
                    }
                }
            }
            None => (0, None),
        };

        let mut request = self.client.get(url);
        if offset > 0 {
            request = request.header(RANGE, format!("bytes={offset}-"));
        }
        let response = request
            .send()
            .await
            .map_err(|e| network(url, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::RANGE_NOT_SATISFIABLE && offset > 0 {
            // Without a remote size a rejected range is the only sign the file is whole.
            if remote.is_none() {
                tracing::warn!("Server rejected resuming at byte {offset}; keeping local file");
                return Ok(DownloadOutcome::AlreadyComplete { size: offset });
            }
            return Err(network(
                url,
                format!("HTTP {status}: local file size {offset} does not match the remote file"),
            ));
        }
        if !status.is_success() {
            return Err(network(url, format!("HTTP {status}")));
        }

        let resumed_from = if status == StatusCode::PARTIAL_CONTENT {
            offset
        } else {
            if offset > 0 {
                tracing::warn!("Server ignored the range request; restarting download");
            }
            0
        };

        let mut file = if resumed_from > 0 {
            OpenOptions::new().append(true).open(dest).await
        } else {
            File::create(dest).await
        }
        .map_err(|e| LinuxBuildError::io(dest, &e))?;

        let total = response
            .content_length()
            .map_or(0, |remaining| resumed_from + remaining);
        let mut downloaded = resumed_from;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| network(url, e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| LinuxBuildError::io(dest, &e))?;
            downloaded += chunk.len() as u64;

            if let Some(cb) = progress {
                cb(downloaded, total);
            }
        }

        file.flush()
            .await
            .map_err(|e| LinuxBuildError::io(dest, &e))?;

        Ok(DownloadOutcome::Transferred {
            resumed_from,
            size: downloaded,
        })
    }

    /// Download `url` into `dest`, replacing any existing file
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(network(url, format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| network(url, e.to_string()))?;
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|e| LinuxBuildError::io(dest, &e))?;
        Ok(bytes.len() as u64)
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

fn network(url: &str, error: String) -> LinuxBuildError {
    LinuxBuildError::Network {
        url: url.to_string(),
        error,
    }
}

/// SHA256 of a file as lowercase hex
pub fn file_checksum(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| LinuxBuildError::io(path, &e))?;
    Ok(compute_checksum(&content))
}

/// Compute SHA256 checksum of data
pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
