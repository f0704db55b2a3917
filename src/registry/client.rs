//! Release index client
//!
//! Fetches the kernel.org `releases.json` document.

use std::time::Duration;

use crate::config::urls;
use crate::core::release::ReleaseIndex;
use crate::error::{LinuxBuildError, Result};

/// Client for the release index
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    /// HTTP client
    client: reqwest::Client,
    /// Release index URL
    index_url: String,
}

impl ReleaseClient {
    /// Create a client for the kernel.org index
    pub fn new() -> Self {
        Self::with_url(urls::RELEASE_INDEX.to_string())
    }

    /// Create a client for a custom index URL
    pub fn with_url(index_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            index_url,
        }
    }

    /// Get the index URL
    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Fetch and parse the release index
    pub async fn fetch_index(&self) -> Result<ReleaseIndex> {
        let url = &self.index_url;
        tracing::debug!("Fetching release index from {url}");

        let network = |error: String| LinuxBuildError::Network {
            url: url.clone(),
            error,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(network(format!("HTTP {}", response.status())));
        }

        let index: ReleaseIndex = response
            .json()
            .await
            .map_err(|e| network(format!("invalid release index: {e}")))?;
        tracing::debug!("Release index has {} entries", index.releases.len());
        Ok(index)
    }
}

impl Default for ReleaseClient {
    fn default() -> Self {
        Self::new()
    }
}
