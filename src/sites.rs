//! Site list loading

use crate::errors::{MonitorError, Result};
use std::path::Path;

/// Read the site list file in full
///
/// Called at the top of every check cycle; the list is never cached, so
/// edits take effect on the next cycle without a restart. Entries are
/// trimmed and blank lines dropped; everything else, duplicates and
/// malformed entries included, passes through in file order.
pub async fn load_sites(path: &Path) -> Result<Vec<String>> {
    if !tokio::fs::try_exists(path).await? {
        return Err(MonitorError::MissingList(path.to_path_buf()));
    }

    let raw = tokio::fs::read_to_string(path).await?;
    let sites = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    Ok(sites)
}
