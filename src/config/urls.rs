//! Remote endpoints

/// kernel.org release index
pub const RELEASE_INDEX: &str = "https://www.kernel.org/releases.json";
