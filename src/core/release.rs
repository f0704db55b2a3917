//! Kernel release index model
//!
//! Mirrors the `releases.json` document published by kernel.org and the
//! selections made over it: grouping by moniker, lookup by version, and the
//! newest release of a moniker.

use reqwest::Url;
use serde::Deserialize;

use crate::error::{LinuxBuildError, Result};

/// Release timestamp information
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Released {
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    /// ISO 8601 date, when present
    #[serde(default)]
    pub isodate: Option<String>,
}

/// A single kernel release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Version identifier, e.g. `6.6.7` or `6.7-rc5`
    pub version: String,
    /// Category, e.g. `mainline`, `stable`, `longterm`
    pub moniker: String,
    /// Release date
    pub released: Released,
    /// Compressed source tarball URL (absent for linux-next)
    #[serde(default)]
    pub source: Option<String>,
    /// Detached signature URL
    #[serde(default)]
    pub pgp: Option<String>,
}

impl Release {
    /// Validated source tarball URL
    pub fn source_url(&self) -> Result<Url> {
        let source = self
            .source
            .as_deref()
            .ok_or_else(|| LinuxBuildError::MissingSource {
                version: self.version.clone(),
            })?;
        secure_url(source)
    }

    /// Validated signature URL
    pub fn pgp_url(&self) -> Result<Url> {
        let pgp = self
            .pgp
            .as_deref()
            .ok_or_else(|| LinuxBuildError::MissingSignature {
                version: self.version.clone(),
            })?;
        secure_url(pgp)
    }
}

/// The release index document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseIndex {
    /// Releases in published order
    pub releases: Vec<Release>,
}

impl ReleaseIndex {
    /// Group releases by moniker
    ///
    /// Groups appear in first-seen order and keep the index order inside.
    pub fn group_by_moniker(&self) -> Vec<(&str, Vec<&Release>)> {
        let mut groups: Vec<(&str, Vec<&Release>)> = Vec::new();
        for release in &self.releases {
            match groups
                .iter_mut()
                .find(|(moniker, _)| *moniker == release.moniker)
            {
                Some((_, members)) => members.push(release),
                None => groups.push((release.moniker.as_str(), vec![release])),
            }
        }
        groups
    }

    /// Releases with the given moniker, in index order
    pub fn by_moniker(&self, moniker: &str) -> Vec<&Release> {
        self.releases
            .iter()
            .filter(|release| release.moniker == moniker)
            .collect()
    }

    /// Release with exactly the given version
    pub fn find_version(&self, version: &str) -> Result<&Release> {
        self.releases
            .iter()
            .find(|release| release.version == version)
            .ok_or_else(|| LinuxBuildError::VersionNotFound {
                version: version.to_string(),
            })
    }

    /// Most recently released entry with the given moniker
    pub fn latest(&self, moniker: &str) -> Result<&Release> {
        self.releases
            .iter()
            .filter(|release| release.moniker == moniker)
            .max_by_key(|release| release.released.timestamp)
            .ok_or_else(|| LinuxBuildError::MonikerNotFound {
                moniker: moniker.to_string(),
            })
    }
}

/// First `limit` items, or all of them when `limit` is 0
pub fn limited<T>(items: &[T], limit: usize) -> &[T] {
    if limit > 0 && limit < items.len() {
        &items[..limit]
    } else {
        items
    }
}

/// Parse a URL and require https
pub fn secure_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|_| LinuxBuildError::InsecureUrl {
        url: raw.to_string(),
    })?;
    if url.scheme() != "https" && !is_local_fixture(&url) {
        return Err(LinuxBuildError::InsecureUrl {
            url: raw.to_string(),
        });
    }
    Ok(url)
}

// Unit tests serve release fixtures from a plain-http loopback server.
#[cfg(test)]
fn is_local_fixture(url: &Url) -> bool {
    url.scheme() == "http" && url.host_str() == Some("127.0.0.1")
}

#[cfg(not(test))]
fn is_local_fixture(_url: &Url) -> bool {
    false
}

/// Last path segment of a URL, used as the local file name
pub fn file_name(url: &Url) -> Option<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
}
