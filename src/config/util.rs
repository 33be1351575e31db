//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find the config file by searching upward from `start`.
///
/// Walks from `start` through its ancestors until `config_name` exists.
/// An absolute `config_name` is returned as-is when it exists.
///
/// # Example
/// ```text
/// /home/user/site/css/          ← start
/// /home/user/site/ampify.toml   ← found!
/// ```
pub fn discover_config(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// tests
// ============================================================================
