//! Release listing
//!
//! Renders the release index as the lines printed by `linux-build list`.

use super::release::{limited, ReleaseIndex};

/// Listing options
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only show this moniker, without a group header
    pub moniker: Option<String>,
    /// Versions per moniker, 0 for all
    pub limit: usize,
}

/// Render the listing as output lines
///
/// Without a moniker filter every group is printed as a `<moniker>:` header
/// followed by its versions, with a blank line between groups.
pub fn render_listing(index: &ReleaseIndex, options: &ListOptions) -> Vec<String> {
    if let Some(moniker) = &options.moniker {
        let releases = index.by_moniker(moniker);
        return limited(&releases, options.limit)
            .iter()
            .map(|release| release.version.clone())
            .collect();
    }

    let mut lines = Vec::new();
    for (i, (moniker, releases)) in index.group_by_moniker().iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("{moniker}:"));
        lines.extend(
            limited(releases, options.limit)
                .iter()
                .map(|release| release.version.clone()),
        );
    }
    lines
}
