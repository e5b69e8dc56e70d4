//! Phase 7: Staging cleanup
//!
//! Unconditionally removes the entire staging directory tree once merge and
//! rewriting are complete, extra unrecognized files included. The staging
//! tree is disposable generator output and must never be committed; leaving
//! it behind is the one way this tool could pollute the repository.
//!
//! Skipped in dry-run mode so the real run still has its input.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};

/// Execute Phase 7: remove the staging tree.
///
/// Returns `true` if a tree was removed, `false` if it was already gone.
pub fn execute(staging_root: &Path) -> Result<bool> {
    if !staging_root.exists() {
        return Ok(false);
    }

    fs::remove_dir_all(staging_root).map_err(|e| Error::Filesystem {
        message: format!(
            "Failed to remove staging directory '{}': {}",
            staging_root.display(),
            e
        ),
    })?;
    info!("removed staging directory {}", staging_root.display());
    Ok(true)
}
